//! Imaging parameter types (focus moves and ImagingSettings20).

use super::{elem, wrap, ToXml};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoFocusMode {
    Auto,
    Manual,
}

impl AutoFocusMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoFocusMode::Auto => "AUTO",
            AutoFocusMode::Manual => "MANUAL",
        }
    }
}

/// ON/OFF toggles share this shape across backlight compensation, wide
/// dynamic range, defogging and image stabilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOffMode {
    On,
    Off,
}

impl OnOffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnOffMode::On => "ON",
            OnOffMode::Off => "OFF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureMode {
    Auto,
    Manual,
}

impl ExposureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExposureMode::Auto => "AUTO",
            ExposureMode::Manual => "MANUAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposurePriority {
    LowNoise,
    FrameRate,
}

impl ExposurePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExposurePriority::LowNoise => "LowNoise",
            ExposurePriority::FrameRate => "FrameRate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrCutFilterMode {
    On,
    Off,
    Auto,
}

impl IrCutFilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrCutFilterMode::On => "ON",
            IrCutFilterMode::Off => "OFF",
            IrCutFilterMode::Auto => "AUTO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhiteBalanceMode {
    Auto,
    Manual,
}

impl WhiteBalanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhiteBalanceMode::Auto => "AUTO",
            WhiteBalanceMode::Manual => "MANUAL",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AbsoluteFocus {
    pub position: f32,
    pub speed: Option<f32>,
}

impl ToXml for AbsoluteFocus {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Position", &self.position.to_string());
        if let Some(speed) = self.speed {
            elem(out, "tt:Speed", &speed.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RelativeFocus {
    pub distance: f32,
    pub speed: Option<f32>,
}

impl ToXml for RelativeFocus {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Distance", &self.distance.to_string());
        if let Some(speed) = self.speed {
            elem(out, "tt:Speed", &speed.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ContinuousFocus {
    pub speed: f32,
}

impl ToXml for ContinuousFocus {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Speed", &self.speed.to_string());
    }
}

/// Exactly one variant is meant to be set; the device rejects mixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusMove {
    pub absolute: Option<AbsoluteFocus>,
    pub relative: Option<RelativeFocus>,
    pub continuous: Option<ContinuousFocus>,
}

impl FocusMove {
    pub fn absolute(position: f32, speed: Option<f32>) -> Self {
        FocusMove {
            absolute: Some(AbsoluteFocus { position, speed }),
            ..Default::default()
        }
    }

    pub fn relative(distance: f32, speed: Option<f32>) -> Self {
        FocusMove {
            relative: Some(RelativeFocus { distance, speed }),
            ..Default::default()
        }
    }

    pub fn continuous(speed: f32) -> Self {
        FocusMove {
            continuous: Some(ContinuousFocus { speed }),
            ..Default::default()
        }
    }
}

impl ToXml for FocusMove {
    fn write_xml(&self, out: &mut String) {
        if let Some(focus) = &self.absolute {
            wrap(out, "tt:Absolute", focus);
        }
        if let Some(focus) = &self.relative {
            wrap(out, "tt:Relative", focus);
        }
        if let Some(focus) = &self.continuous {
            wrap(out, "tt:Continuous", focus);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BacklightCompensation20 {
    pub mode: OnOffMode,
    pub level: Option<f32>,
}

impl ToXml for BacklightCompensation20 {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Mode", self.mode.as_str());
        if let Some(level) = self.level {
            elem(out, "tt:Level", &level.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Exposure20 {
    pub mode: Option<ExposureMode>,
    pub priority: Option<ExposurePriority>,
    pub min_exposure_time: Option<f32>,
    pub max_exposure_time: Option<f32>,
    pub min_gain: Option<f32>,
    pub max_gain: Option<f32>,
    pub min_iris: Option<f32>,
    pub max_iris: Option<f32>,
    pub exposure_time: Option<f32>,
    pub gain: Option<f32>,
    pub iris: Option<f32>,
}

impl ToXml for Exposure20 {
    fn write_xml(&self, out: &mut String) {
        if let Some(mode) = self.mode {
            elem(out, "tt:Mode", mode.as_str());
        }
        if let Some(priority) = self.priority {
            elem(out, "tt:Priority", priority.as_str());
        }
        let floats = [
            ("tt:MinExposureTime", self.min_exposure_time),
            ("tt:MaxExposureTime", self.max_exposure_time),
            ("tt:MinGain", self.min_gain),
            ("tt:MaxGain", self.max_gain),
            ("tt:MinIris", self.min_iris),
            ("tt:MaxIris", self.max_iris),
            ("tt:ExposureTime", self.exposure_time),
            ("tt:Gain", self.gain),
            ("tt:Iris", self.iris),
        ];
        for (name, value) in floats {
            if let Some(value) = value {
                elem(out, name, &value.to_string());
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusConfiguration20 {
    pub auto_focus_mode: Option<AutoFocusMode>,
    pub default_speed: Option<f32>,
    pub near_limit: Option<f32>,
    pub far_limit: Option<f32>,
}

impl ToXml for FocusConfiguration20 {
    fn write_xml(&self, out: &mut String) {
        if let Some(mode) = self.auto_focus_mode {
            elem(out, "tt:AutoFocusMode", mode.as_str());
        }
        if let Some(speed) = self.default_speed {
            elem(out, "tt:DefaultSpeed", &speed.to_string());
        }
        if let Some(limit) = self.near_limit {
            elem(out, "tt:NearLimit", &limit.to_string());
        }
        if let Some(limit) = self.far_limit {
            elem(out, "tt:FarLimit", &limit.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WideDynamicRange20 {
    pub mode: OnOffMode,
    pub level: Option<f32>,
}

impl ToXml for WideDynamicRange20 {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Mode", self.mode.as_str());
        if let Some(level) = self.level {
            elem(out, "tt:Level", &level.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WhiteBalance20 {
    pub mode: WhiteBalanceMode,
    pub cr_gain: Option<f32>,
    pub cb_gain: Option<f32>,
}

impl ToXml for WhiteBalance20 {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Mode", self.mode.as_str());
        if let Some(gain) = self.cr_gain {
            elem(out, "tt:CrGain", &gain.to_string());
        }
        if let Some(gain) = self.cb_gain {
            elem(out, "tt:CbGain", &gain.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageStabilization {
    pub mode: OnOffMode,
    pub level: Option<f32>,
}

impl ToXml for ImageStabilization {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Mode", self.mode.as_str());
        if let Some(level) = self.level {
            elem(out, "tt:Level", &level.to_string());
        }
    }
}

#[derive(Debug, Clone)]
pub struct IrCutFilterAutoAdjustment {
    pub boundary_type: String,
    pub boundary_offset: Option<f32>,
    pub response_time: Option<String>,
}

impl ToXml for IrCutFilterAutoAdjustment {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:BoundaryType", &self.boundary_type);
        if let Some(offset) = self.boundary_offset {
            elem(out, "tt:BoundaryOffset", &offset.to_string());
        }
        if let Some(time) = &self.response_time {
            elem(out, "tt:ResponseTime", time);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToneCompensation {
    pub mode: OnOffMode,
    pub level: Option<f32>,
}

impl ToXml for ToneCompensation {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Mode", self.mode.as_str());
        if let Some(level) = self.level {
            elem(out, "tt:Level", &level.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Defogging {
    pub mode: OnOffMode,
    pub level: Option<f32>,
}

impl ToXml for Defogging {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Mode", self.mode.as_str());
        if let Some(level) = self.level {
            elem(out, "tt:Level", &level.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NoiseReduction {
    pub level: f32,
}

impl ToXml for NoiseReduction {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Level", &self.level.to_string());
    }
}

/// Schema puts these behind nested Extension elements; the flat struct hides
/// the nesting and `write_xml` restores it.
#[derive(Debug, Clone, Default)]
pub struct ImagingSettingsExtension {
    pub image_stabilization: Option<ImageStabilization>,
    pub ir_cut_filter_auto_adjustment: Option<IrCutFilterAutoAdjustment>,
    pub tone_compensation: Option<ToneCompensation>,
    pub defogging: Option<Defogging>,
    pub noise_reduction: Option<NoiseReduction>,
}

impl ImagingSettingsExtension {
    fn is_empty(&self) -> bool {
        self.image_stabilization.is_none()
            && self.ir_cut_filter_auto_adjustment.is_none()
            && self.tone_compensation.is_none()
            && self.defogging.is_none()
            && self.noise_reduction.is_none()
    }
}

impl ToXml for ImagingSettingsExtension {
    fn write_xml(&self, out: &mut String) {
        if let Some(stabilization) = &self.image_stabilization {
            wrap(out, "tt:ImageStabilization", stabilization);
        }
        let level2 = self.ir_cut_filter_auto_adjustment.is_some()
            || self.tone_compensation.is_some()
            || self.defogging.is_some()
            || self.noise_reduction.is_some();
        if !level2 {
            return;
        }
        out.push_str("<tt:Extension>");
        if let Some(adjustment) = &self.ir_cut_filter_auto_adjustment {
            wrap(out, "tt:IrCutFilterAutoAdjustment", adjustment);
        }
        let level3 = self.tone_compensation.is_some()
            || self.defogging.is_some()
            || self.noise_reduction.is_some();
        if level3 {
            out.push_str("<tt:Extension>");
            if let Some(tone) = &self.tone_compensation {
                wrap(out, "tt:ToneCompensation", tone);
            }
            if let Some(defogging) = &self.defogging {
                wrap(out, "tt:Defogging", defogging);
            }
            if let Some(noise) = &self.noise_reduction {
                wrap(out, "tt:NoiseReduction", noise);
            }
            out.push_str("</tt:Extension>");
        }
        out.push_str("</tt:Extension>");
    }
}

/// Everything SetImagingSettings can carry. All optional; absent fields keep
/// their current value on the device.
#[derive(Debug, Clone, Default)]
pub struct ImagingSettings20 {
    pub backlight_compensation: Option<BacklightCompensation20>,
    pub brightness: Option<f32>,
    pub color_saturation: Option<f32>,
    pub contrast: Option<f32>,
    pub exposure: Option<Exposure20>,
    pub focus: Option<FocusConfiguration20>,
    pub ir_cut_filter: Option<IrCutFilterMode>,
    pub sharpness: Option<f32>,
    pub wide_dynamic_range: Option<WideDynamicRange20>,
    pub white_balance: Option<WhiteBalance20>,
    pub extension: Option<ImagingSettingsExtension>,
}

impl ToXml for ImagingSettings20 {
    fn write_xml(&self, out: &mut String) {
        if let Some(backlight) = &self.backlight_compensation {
            wrap(out, "tt:BacklightCompensation", backlight);
        }
        if let Some(brightness) = self.brightness {
            elem(out, "tt:Brightness", &brightness.to_string());
        }
        if let Some(saturation) = self.color_saturation {
            elem(out, "tt:ColorSaturation", &saturation.to_string());
        }
        if let Some(contrast) = self.contrast {
            elem(out, "tt:Contrast", &contrast.to_string());
        }
        if let Some(exposure) = &self.exposure {
            wrap(out, "tt:Exposure", exposure);
        }
        if let Some(focus) = &self.focus {
            wrap(out, "tt:Focus", focus);
        }
        if let Some(mode) = self.ir_cut_filter {
            elem(out, "tt:IrCutFilter", mode.as_str());
        }
        if let Some(sharpness) = self.sharpness {
            elem(out, "tt:Sharpness", &sharpness.to_string());
        }
        if let Some(wdr) = &self.wide_dynamic_range {
            wrap(out, "tt:WideDynamicRange", wdr);
        }
        if let Some(wb) = &self.white_balance {
            wrap(out, "tt:WhiteBalance", wb);
        }
        if let Some(extension) = &self.extension {
            if !extension.is_empty() {
                wrap(out, "tt:Extension", extension);
            }
        }
    }
}
