//! PTZ parameter types: vectors, speeds, preset tours and the full
//! PTZConfiguration written by SetConfiguration.

use super::{attr, elem, wrap, ToXml};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EFlipMode {
    On,
    Off,
    Extended,
}

impl EFlipMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EFlipMode::On => "ON",
            EFlipMode::Off => "OFF",
            EFlipMode::Extended => "Extended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseMode {
    On,
    Off,
    Auto,
    Extended,
}

impl ReverseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReverseMode::On => "ON",
            ReverseMode::Off => "OFF",
            ReverseMode::Auto => "AUTO",
            ReverseMode::Extended => "Extended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetTourState {
    Idle,
    Touring,
    Paused,
}

impl PresetTourState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetTourState::Idle => "Idle",
            PresetTourState::Touring => "Touring",
            PresetTourState::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetTourDirection {
    Forward,
    Backward,
    Extended,
}

impl PresetTourDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetTourDirection::Forward => "Forward",
            PresetTourDirection::Backward => "Backward",
            PresetTourDirection::Extended => "Extended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetTourOperation {
    Start,
    Stop,
    Pause,
    Extended,
}

impl PresetTourOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetTourOperation::Start => "Start",
            PresetTourOperation::Stop => "Stop",
            PresetTourOperation::Pause => "Pause",
            PresetTourOperation::Extended => "Extended",
        }
    }
}

/// Writes children for an element the caller names, since the schema reuses
/// this shape for Zoom, speed zoom and zoom limits ranges.
#[derive(Debug, Clone)]
pub struct Vector1D {
    pub x: f32,
    pub space: Option<String>,
}

impl Vector1D {
    pub fn new(x: f32) -> Self {
        Vector1D { x, space: None }
    }

    fn write_as(&self, out: &mut String, name: &str) {
        out.push('<');
        out.push_str(name);
        attr(out, "x", &self.x.to_string());
        if let Some(space) = &self.space {
            attr(out, "space", space);
        }
        out.push_str("/>");
    }
}

#[derive(Debug, Clone)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
    pub space: Option<String>,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Vector2D { x, y, space: None }
    }

    fn write_as(&self, out: &mut String, name: &str) {
        out.push('<');
        out.push_str(name);
        attr(out, "x", &self.x.to_string());
        attr(out, "y", &self.y.to_string());
        if let Some(space) = &self.space {
            attr(out, "space", space);
        }
        out.push_str("/>");
    }
}

/// Pan/tilt plus zoom position or translation.
#[derive(Debug, Clone, Default)]
pub struct PtzVector {
    pub pan_tilt: Option<Vector2D>,
    pub zoom: Option<Vector1D>,
}

impl PtzVector {
    pub fn new(pan: f32, tilt: f32, zoom: f32) -> Self {
        PtzVector {
            pan_tilt: Some(Vector2D::new(pan, tilt)),
            zoom: Some(Vector1D::new(zoom)),
        }
    }
}

impl ToXml for PtzVector {
    fn write_xml(&self, out: &mut String) {
        if let Some(pan_tilt) = &self.pan_tilt {
            pan_tilt.write_as(out, "tt:PanTilt");
        }
        if let Some(zoom) = &self.zoom {
            zoom.write_as(out, "tt:Zoom");
        }
    }
}

/// Same wire shape as [`PtzVector`], separate type since speeds and
/// positions are not interchangeable.
#[derive(Debug, Clone, Default)]
pub struct PtzSpeed {
    pub pan_tilt: Option<Vector2D>,
    pub zoom: Option<Vector1D>,
}

impl PtzSpeed {
    pub fn new(pan: f32, tilt: f32, zoom: f32) -> Self {
        PtzSpeed {
            pan_tilt: Some(Vector2D::new(pan, tilt)),
            zoom: Some(Vector1D::new(zoom)),
        }
    }
}

impl ToXml for PtzSpeed {
    fn write_xml(&self, out: &mut String) {
        if let Some(pan_tilt) = &self.pan_tilt {
            pan_tilt.write_as(out, "tt:PanTilt");
        }
        if let Some(zoom) = &self.zoom {
            zoom.write_as(out, "tt:Zoom");
        }
    }
}

/// WGS84 coordinate, written as attributes on the wrapping element.
#[derive(Debug, Clone, Copy)]
pub struct PtzGeoLocation {
    pub lon: f64,
    pub lat: f64,
    pub elevation: Option<f32>,
}

impl PtzGeoLocation {
    pub(crate) fn write_as(&self, out: &mut String, name: &str) {
        out.push('<');
        out.push_str(name);
        attr(out, "lon", &self.lon.to_string());
        attr(out, "lat", &self.lat.to_string());
        if let Some(elevation) = self.elevation {
            attr(out, "elevation", &elevation.to_string());
        }
        out.push_str("/>");
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl ToXml for FloatRange {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Min", &self.min.to_string());
        elem(out, "tt:Max", &self.max.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct Space2DDescription {
    pub uri: String,
    pub x_range: FloatRange,
    pub y_range: FloatRange,
}

impl ToXml for Space2DDescription {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:URI", &self.uri);
        wrap(out, "tt:XRange", &self.x_range);
        wrap(out, "tt:YRange", &self.y_range);
    }
}

#[derive(Debug, Clone)]
pub struct Space1DDescription {
    pub uri: String,
    pub x_range: FloatRange,
}

impl ToXml for Space1DDescription {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:URI", &self.uri);
        wrap(out, "tt:XRange", &self.x_range);
    }
}

#[derive(Debug, Clone)]
pub struct PanTiltLimits {
    pub range: Space2DDescription,
}

impl ToXml for PanTiltLimits {
    fn write_xml(&self, out: &mut String) {
        wrap(out, "tt:Range", &self.range);
    }
}

#[derive(Debug, Clone)]
pub struct ZoomLimits {
    pub range: Space1DDescription,
}

impl ToXml for ZoomLimits {
    fn write_xml(&self, out: &mut String) {
        wrap(out, "tt:Range", &self.range);
    }
}

#[derive(Debug, Clone, Default)]
pub struct PtControlDirection {
    pub eflip: Option<EFlipMode>,
    pub reverse: Option<ReverseMode>,
}

impl ToXml for PtControlDirection {
    fn write_xml(&self, out: &mut String) {
        if let Some(mode) = self.eflip {
            out.push_str("<tt:EFlip>");
            elem(out, "tt:Mode", mode.as_str());
            out.push_str("</tt:EFlip>");
        }
        if let Some(mode) = self.reverse {
            out.push_str("<tt:Reverse>");
            elem(out, "tt:Mode", mode.as_str());
            out.push_str("</tt:Reverse>");
        }
    }
}

/// Configuration written back by SetConfiguration. The `token` attribute is
/// emitted by the message builder.
#[derive(Debug, Clone)]
pub struct PtzConfiguration {
    pub token: String,
    pub name: String,
    pub use_count: Option<i32>,
    pub move_ramp: Option<i32>,
    pub preset_ramp: Option<i32>,
    pub preset_tour_ramp: Option<i32>,
    pub node_token: String,
    pub default_absolute_pant_tilt_position_space: Option<String>,
    pub default_absolute_zoom_position_space: Option<String>,
    pub default_relative_pan_tilt_translation_space: Option<String>,
    pub default_relative_zoom_translation_space: Option<String>,
    pub default_continuous_pan_tilt_velocity_space: Option<String>,
    pub default_continuous_zoom_velocity_space: Option<String>,
    pub default_ptz_speed: Option<PtzSpeed>,
    pub default_ptz_timeout: Option<String>,
    pub pan_tilt_limits: Option<PanTiltLimits>,
    pub zoom_limits: Option<ZoomLimits>,
    pub pt_control_direction: Option<PtControlDirection>,
}

impl ToXml for PtzConfiguration {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Name", &self.name);
        if let Some(count) = self.use_count {
            elem(out, "tt:UseCount", &count.to_string());
        }
        elem(out, "tt:NodeToken", &self.node_token);
        let spaces = [
            (
                "tt:DefaultAbsolutePantTiltPositionSpace",
                &self.default_absolute_pant_tilt_position_space,
            ),
            (
                "tt:DefaultAbsoluteZoomPositionSpace",
                &self.default_absolute_zoom_position_space,
            ),
            (
                "tt:DefaultRelativePanTiltTranslationSpace",
                &self.default_relative_pan_tilt_translation_space,
            ),
            (
                "tt:DefaultRelativeZoomTranslationSpace",
                &self.default_relative_zoom_translation_space,
            ),
            (
                "tt:DefaultContinuousPanTiltVelocitySpace",
                &self.default_continuous_pan_tilt_velocity_space,
            ),
            (
                "tt:DefaultContinuousZoomVelocitySpace",
                &self.default_continuous_zoom_velocity_space,
            ),
        ];
        for (name, value) in spaces {
            if let Some(value) = value {
                elem(out, name, value);
            }
        }
        if let Some(speed) = &self.default_ptz_speed {
            wrap(out, "tt:DefaultPTZSpeed", speed);
        }
        if let Some(timeout) = &self.default_ptz_timeout {
            elem(out, "tt:DefaultPTZTimeout", timeout);
        }
        if let Some(limits) = &self.pan_tilt_limits {
            wrap(out, "tt:PanTiltLimits", limits);
        }
        if let Some(limits) = &self.zoom_limits {
            wrap(out, "tt:ZoomLimits", limits);
        }
        if let Some(direction) = &self.pt_control_direction {
            out.push_str("<tt:Extension>");
            wrap(out, "tt:PTControlDirection", direction);
            out.push_str("</tt:Extension>");
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PresetTourStartingCondition {
    pub random_preset_order: Option<bool>,
    pub recurring_time: Option<i32>,
    pub recurring_duration: Option<String>,
    pub direction: Option<PresetTourDirection>,
}

impl ToXml for PresetTourStartingCondition {
    fn write_xml(&self, out: &mut String) {
        if let Some(time) = self.recurring_time {
            elem(out, "tt:RecurringTime", &time.to_string());
        }
        if let Some(duration) = &self.recurring_duration {
            elem(out, "tt:RecurringDuration", duration);
        }
        if let Some(direction) = self.direction {
            elem(out, "tt:Direction", direction.as_str());
        }
        if let Some(random) = self.random_preset_order {
            out.push_str("<tt:Extension>");
            elem(out, "tt:RandomPresetOrder", &random.to_string());
            out.push_str("</tt:Extension>");
        }
    }
}

/// One stop on a tour: either an existing preset token or a raw position.
#[derive(Debug, Clone, Default)]
pub struct PresetTourSpot {
    pub preset_token: Option<String>,
    pub position: Option<PtzVector>,
    pub speed: Option<PtzSpeed>,
    pub stay_time: Option<String>,
}

impl ToXml for PresetTourSpot {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<tt:PresetDetail>");
        if let Some(token) = &self.preset_token {
            elem(out, "tt:PresetToken", token);
        }
        if let Some(position) = &self.position {
            wrap(out, "tt:PTZPosition", position);
        }
        out.push_str("</tt:PresetDetail>");
        if let Some(speed) = &self.speed {
            wrap(out, "tt:Speed", speed);
        }
        if let Some(stay) = &self.stay_time {
            elem(out, "tt:StayTime", stay);
        }
    }
}

#[derive(Debug, Clone)]
pub struct PresetTourStatus {
    pub state: PresetTourState,
}

impl ToXml for PresetTourStatus {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:State", self.state.as_str());
    }
}

/// Tour description sent by ModifyPresetTour. The message builder emits the
/// token attribute.
#[derive(Debug, Clone)]
pub struct PresetTour {
    pub token: String,
    pub name: Option<String>,
    pub status: PresetTourStatus,
    pub auto_start: bool,
    pub starting_condition: PresetTourStartingCondition,
    pub tour_spots: Vec<PresetTourSpot>,
}

impl ToXml for PresetTour {
    fn write_xml(&self, out: &mut String) {
        if let Some(name) = &self.name {
            elem(out, "tt:Name", name);
        }
        wrap(out, "tt:Status", &self.status);
        elem(out, "tt:AutoStart", &self.auto_start.to_string());
        wrap(out, "tt:StartingCondition", &self.starting_condition);
        for spot in &self.tour_spots {
            wrap(out, "tt:TourSpot", spot);
        }
    }
}
