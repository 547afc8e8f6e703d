//! HTTP vision service against a local one-shot server.

#![cfg(feature = "vision-http")]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use serde_json::{json, Map, Value};

use person_sensor::{
    ComponentConfig, Dependencies, HttpVisionConfig, HttpVisionService, NamedCamera,
    PersonSensor, Sensor, SensorError, VisionService, PERSON_DETECTED,
};

/// Serve one canned response per entry, returning the request lines seen.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request line");
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).expect("read header");
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }
            seen.push(request_line.trim_end().to_string());
            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write response");
        }
        seen
    });
    (base, handle)
}

fn service(base: &str) -> HttpVisionService {
    HttpVisionService::new(HttpVisionConfig {
        name: "people".to_string(),
        url: base.to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("http vision service")
}

#[test]
fn fetches_detections_for_camera() {
    let (base, server) = serve(vec![(
        200,
        r#"{"detections": [{"class_name": "person", "confidence": 0.93,
            "x_min": 4, "y_min": 8, "x_max": 120, "y_max": 300}]}"#,
    )]);

    let detections = service(&base).detections_from_camera("front door").unwrap();
    assert_eq!(detections.len(), 1);
    assert!(detections[0].is_class("person"));
    assert_eq!(detections[0].x_max, Some(120));

    let seen = server.join().unwrap();
    assert_eq!(seen, vec!["GET /detections?camera=front+door HTTP/1.1"]);
}

#[test]
fn fetches_properties() {
    let (base, server) = serve(vec![(
        200,
        r#"{"detections_supported": true, "classifications_supported": false}"#,
    )]);

    let props = service(&base).properties().unwrap();
    assert!(props.detections_supported);
    assert!(!props.classifications_supported);
    assert_eq!(server.join().unwrap(), vec!["GET /properties HTTP/1.1"]);
}

#[test]
fn server_error_is_an_error() {
    let (base, server) = serve(vec![(500, r#"{"error": "model crashed"}"#)]);

    let err = service(&base).detections_from_camera("front").unwrap_err();
    assert!(format!("{:#}", err).contains("detections request to vision service people"));
    server.join().unwrap();
}

#[test]
fn malformed_body_is_an_error() {
    let (base, server) = serve(vec![(200, "not json")]);

    let err = service(&base).detections_from_camera("front").unwrap_err();
    assert!(err
        .to_string()
        .contains("invalid detections response from vision service people"));
    server.join().unwrap();
}

#[test]
fn sensor_reads_through_http_service() {
    let (base, server) = serve(vec![
        (200, r#"{"detections": [{"class_name": "person", "confidence": 0.8}]}"#),
        (200, r#"{"detections": []}"#),
        (503, r#"{"error": "busy"}"#),
        (200, r#"{"detections_supported": true}"#),
    ]);

    let deps = Dependencies::new()
        .with_camera(Arc::new(NamedCamera::new("front")))
        .with_vision(Arc::new(service(&base)));
    let mut attributes = Map::new();
    attributes.insert("camera_name".to_string(), Value::from("front"));
    attributes.insert("vision_service".to_string(), Value::from("people"));
    let sensor = PersonSensor::new(&ComponentConfig::new("person-sensor", attributes), &deps)
        .unwrap();

    assert_eq!(sensor.readings().unwrap()[PERSON_DETECTED], json!(1));
    assert_eq!(sensor.readings().unwrap()[PERSON_DETECTED], json!(0));
    // The failed call is followed by a properties lookup, then the error surfaces.
    let err = sensor.readings().unwrap_err();
    assert!(matches!(err, SensorError::Vision(_)));
    let chain = format!("{:#}", err);
    assert!(chain.contains("detections request to vision service people"));
    assert!(chain.contains("503"));

    let seen = server.join().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[3], "GET /properties HTTP/1.1");
}
