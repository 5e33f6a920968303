//! End-to-end eventing tests over a canned transport: connect a session,
//! drive the pull-point lifecycle and check both the requests that leave the
//! SOAP layer and the decoding of what comes back.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use onvif_client_rs::error::{Error, Result};
use onvif_client_rs::messages::event::CreatePullPointSubscription;
use onvif_client_rs::params::event::{sentinel_time, FilterType};
use onvif_client_rs::services::EventService;
use onvif_client_rs::session::DeviceSession;
use onvif_client_rs::soap::{SoapClient, Transport};

/// Hands out canned responses in order and records every request.
struct MockTransport {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    fn new(responses: Vec<&str>) -> Arc<Self> {
        Arc::new(MockTransport {
            responses: Mutex::new(responses.into_iter().map(str::to_string).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn push(&self, response: &str) {
        self.responses.lock().unwrap().push_back(response.to_string());
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request_at(&self, index: usize) -> (String, String) {
        self.requests.lock().unwrap()[index].clone()
    }

    fn last_request(&self) -> (String, String) {
        self.requests.lock().unwrap().last().cloned().expect("no requests recorded")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, endpoint: &Url, envelope: &str, _per_try: Duration) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), envelope.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Parse("mock transport ran out of responses".into()))
    }
}

const DATE_TIME_RESPONSE: &str = r#"<Envelope><Body><GetSystemDateAndTimeResponse>
    <SystemDateAndTime><UTCDateTime>
        <Time><Hour>12</Hour><Minute>0</Minute><Second>0</Second></Time>
        <Date><Year>2024</Year><Month>6</Month><Day>1</Day></Date>
    </UTCDateTime></SystemDateAndTime>
</GetSystemDateAndTimeResponse></Body></Envelope>"#;

const DEVICE_INFO_RESPONSE: &str = r#"<Envelope><Body><GetDeviceInformationResponse>
    <Manufacturer>Acme</Manufacturer><Model>Cam-1</Model>
    <FirmwareVersion>1.0</FirmwareVersion><SerialNumber>0001</SerialNumber>
    <HardwareId>hw-1</HardwareId>
</GetDeviceInformationResponse></Body></Envelope>"#;

const CAPABILITIES_RESPONSE: &str = r#"<Envelope><Body><GetCapabilitiesResponse><Capabilities>
    <Media><XAddr>http://cam/onvif/media_service</XAddr></Media>
    <Events><XAddr>http://cam/onvif/event_service</XAddr></Events>
</Capabilities></GetCapabilitiesResponse></Body></Envelope>"#;

const CAPABILITIES_NO_EVENTS_RESPONSE: &str = r#"<Envelope><Body><GetCapabilitiesResponse><Capabilities>
    <Media><XAddr>http://cam/onvif/media_service</XAddr></Media>
</Capabilities></GetCapabilitiesResponse></Body></Envelope>"#;

const PROFILES_RESPONSE: &str = r#"<Envelope><Body><GetProfilesResponse>
    <Profiles token="prof_0"><Name>mainStream</Name></Profiles>
</GetProfilesResponse></Body></Envelope>"#;

const SERVICES_RESPONSE: &str = r#"<Envelope><Body><GetServicesResponse>
    <Service>
        <Namespace>http://www.onvif.org/ver10/events/wsdl</Namespace>
        <XAddr>http://cam/onvif/event_service</XAddr>
    </Service>
</GetServicesResponse></Body></Envelope>"#;

const SUBSCRIBE_RESPONSE: &str = r#"<Envelope><Body><CreatePullPointSubscriptionResponse>
    <SubscriptionReference><Address>http://cam/onvif/Subscription?Idx=0</Address></SubscriptionReference>
    <CurrentTime>2024-06-01T12:00:00Z</CurrentTime>
    <TerminationTime>2024-06-01T12:10:00Z</TerminationTime>
</CreatePullPointSubscriptionResponse></Body></Envelope>"#;

const PULL_RESPONSE: &str = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
    xmlns:tev="http://www.onvif.org/ver10/events/wsdl"
    xmlns:wsnt="http://docs.oasis-open.org/wsn/b-2"
    xmlns:tt="http://www.onvif.org/ver10/schema">
    <s:Body><tev:PullMessagesResponse>
        <tev:CurrentTime>2024-06-01T12:00:30Z</tev:CurrentTime>
        <tev:TerminationTime>2024-06-01T12:10:00Z</tev:TerminationTime>
        <wsnt:NotificationMessage>
            <wsnt:Topic>tns1:RuleEngine/CellMotionDetector/Motion</wsnt:Topic>
            <wsnt:Message><tt:Message UtcTime="2024-06-01T12:00:29Z" PropertyOperation="Changed">
                <tt:Source><tt:SimpleItem Name="Rule" Value="MyMotion"/></tt:Source>
                <tt:Data><tt:SimpleItem Name="IsMotion" Value="true"/></tt:Data>
            </tt:Message></wsnt:Message>
        </wsnt:NotificationMessage>
    </tev:PullMessagesResponse></s:Body></s:Envelope>"#;

const RENEW_RESPONSE: &str = r#"<Envelope><Body><RenewResponse>
    <TerminationTime>2024-06-01T12:20:00Z</TerminationTime>
    <CurrentTime>2024-06-01T12:09:00Z</CurrentTime>
</RenewResponse></Body></Envelope>"#;

const UNSUBSCRIBE_RESPONSE: &str =
    "<Envelope><Body><UnsubscribeResponse/></Body></Envelope>";

const FAULT_RESPONSE: &str = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope">
    <s:Body><s:Fault>
        <s:Code><s:Value>s:Receiver</s:Value></s:Code>
        <s:Reason><s:Text xml:lang="en">ResourceUnknown</s:Text></s:Reason>
    </s:Fault></s:Body></s:Envelope>"#;

fn connect_responses() -> Vec<&'static str> {
    vec![
        DATE_TIME_RESPONSE,
        DEVICE_INFO_RESPONSE,
        CAPABILITIES_RESPONSE,
        PROFILES_RESPONSE,
        SERVICES_RESPONSE,
    ]
}

async fn connected_session(transport: Arc<MockTransport>) -> DeviceSession {
    let client = SoapClient::with_transport(transport as Arc<dyn Transport>, None);
    let mut session = DeviceSession::with_client("192.168.1.168", 80, client);
    session.connect().await.expect("connect should succeed");
    session
}

#[tokio::test]
async fn full_subscription_lifecycle() {
    let transport = MockTransport::new(connect_responses());
    let session = connected_session(Arc::clone(&transport)).await;
    let connect_requests = transport.request_count();

    transport.push(SUBSCRIBE_RESPONSE);
    transport.push(PULL_RESPONSE);
    transport.push(RENEW_RESPONSE);
    transport.push(UNSUBSCRIBE_RESPONSE);

    let events = EventService::new(&session);

    let subscription = events
        .create_pull_point_subscription(CreatePullPointSubscription::with_filter(
            FilterType::topic("tns1:RuleEngine//."),
        ))
        .await
        .unwrap();
    assert_eq!(subscription.address, "http://cam/onvif/Subscription?Idx=0");
    assert!(subscription.termination_time.is_some());

    // The subscribe request goes to the event service endpoint and carries
    // the filter.
    let (endpoint, envelope) = transport.request_at(connect_requests);
    assert_eq!(endpoint, "http://cam/onvif/event_service");
    assert!(envelope.contains("<tev:CreatePullPointSubscription>"));
    assert!(envelope.contains("tns1:RuleEngine//."));

    let batch = events
        .pull_messages(&subscription.address, "PT1M", 7)
        .await
        .unwrap();
    assert_eq!(batch.notification_messages.len(), 1);
    let message = &batch.notification_messages[0];
    assert_eq!(message.topic, "tns1:RuleEngine/CellMotionDetector/Motion");
    assert_eq!(message.data.name, "IsMotion");
    assert_eq!(message.data.value, "true");
    assert_ne!(batch.termination_time, sentinel_time());

    // The pull goes to the subscription manager, not the service endpoint,
    // with WS-Addressing and the untouched limit.
    let (endpoint, envelope) = transport.request_at(connect_requests + 1);
    assert_eq!(endpoint, "http://cam/onvif/Subscription?Idx=0");
    assert!(envelope.contains("<wsa:To>http://cam/onvif/Subscription?Idx=0</wsa:To>"));
    assert!(envelope.contains("PullMessagesRequest"));
    assert!(envelope.contains("<tev:Timeout>PT1M</tev:Timeout>"));
    assert!(envelope.contains("<tev:MessageLimit>7</tev:MessageLimit>"));

    let renewed = events
        .renew(&subscription.address, "PT10M")
        .await
        .unwrap();
    assert!(renewed.termination_time.is_some());
    let (_, envelope) = transport.last_request();
    assert!(envelope.contains("<wsnt:Renew><wsnt:TerminationTime>PT10M</wsnt:TerminationTime></wsnt:Renew>"));

    events.unsubscribe(&subscription.address).await.unwrap();
    let (endpoint, envelope) = transport.last_request();
    assert_eq!(endpoint, "http://cam/onvif/Subscription?Idx=0");
    assert!(envelope.contains("<wsnt:Unsubscribe/>"));
}

#[tokio::test]
async fn subscription_ops_without_address_never_hit_the_wire() {
    let transport = MockTransport::new(connect_responses());
    let session = connected_session(Arc::clone(&transport)).await;
    let requests_after_connect = transport.request_count();

    let events = EventService::new(&session);

    assert!(matches!(
        events.pull_messages("", "PT1M", 10).await,
        Err(Error::NotSubscribed)
    ));
    assert!(matches!(
        events.renew("  ", "PT10M").await,
        Err(Error::NotSubscribed)
    ));
    assert!(matches!(
        events.unsubscribe("").await,
        Err(Error::NotSubscribed)
    ));
    assert!(matches!(
        events.set_synchronization_point("").await,
        Err(Error::NotSubscribed)
    ));

    assert_eq!(transport.request_count(), requests_after_connect);
}

#[tokio::test]
async fn device_without_event_capability_is_rejected() {
    let transport = MockTransport::new(vec![
        DATE_TIME_RESPONSE,
        DEVICE_INFO_RESPONSE,
        CAPABILITIES_NO_EVENTS_RESPONSE,
        PROFILES_RESPONSE,
        SERVICES_RESPONSE,
    ]);
    let session = connected_session(Arc::clone(&transport)).await;
    let requests_after_connect = transport.request_count();

    let events = EventService::new(&session);
    assert!(matches!(
        events
            .create_pull_point_subscription(CreatePullPointSubscription::default())
            .await,
        Err(Error::Unsupported("event"))
    ));
    assert!(matches!(
        events.get_event_properties().await,
        Err(Error::Unsupported("event"))
    ));
    assert_eq!(transport.request_count(), requests_after_connect);
}

#[tokio::test]
async fn repeated_unsubscribe_yields_typed_fault_not_panic() {
    let transport = MockTransport::new(connect_responses());
    let session = connected_session(Arc::clone(&transport)).await;

    transport.push(UNSUBSCRIBE_RESPONSE);
    transport.push(FAULT_RESPONSE);

    let events = EventService::new(&session);
    let address = "http://cam/onvif/Subscription?Idx=0";

    events.unsubscribe(address).await.unwrap();

    // The subscription is gone; the device answers the second attempt with a
    // fault, which comes back as a matchable error the caller may ignore.
    let before = transport.request_count();
    match events.unsubscribe(address).await {
        Err(Error::Fault { code, reason }) => {
            assert_eq!(code, "s:Receiver");
            assert_eq!(reason, "ResourceUnknown");
        }
        other => panic!("expected fault, got {other:?}"),
    }
    // The second attempt did go out on the wire.
    assert_eq!(transport.request_count(), before + 1);
}

#[tokio::test]
async fn soap_fault_surfaces_as_typed_error() {
    let transport = MockTransport::new(connect_responses());
    let session = connected_session(Arc::clone(&transport)).await;

    transport.push(FAULT_RESPONSE);
    let events = EventService::new(&session);

    match events
        .pull_messages("http://cam/onvif/Subscription?Idx=9", "PT1M", 10)
        .await
    {
        Err(Error::Fault { code, reason }) => {
            assert_eq!(code, "s:Receiver");
            assert_eq!(reason, "ResourceUnknown");
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

#[tokio::test]
async fn subscribe_without_address_in_response_is_a_parse_error() {
    let transport = MockTransport::new(connect_responses());
    let session = connected_session(Arc::clone(&transport)).await;

    transport.push("<Envelope><Body><CreatePullPointSubscriptionResponse/></Body></Envelope>");
    let events = EventService::new(&session);

    assert!(matches!(
        events
            .create_pull_point_subscription(CreatePullPointSubscription::default())
            .await,
        Err(Error::Parse(_))
    ));
}
