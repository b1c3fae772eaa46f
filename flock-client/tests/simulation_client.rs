use flock_client::SimulationClient;
use flock_shared::{AddObstacleRequest, Point, SetAttractorRequest};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stores received command bodies for verification
#[derive(Clone, Default)]
struct ReceivedBodies {
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl ReceivedBodies {
    fn new() -> Self {
        Self::default()
    }

    fn add(&self, body: Value) {
        self.bodies.lock().unwrap().push(body);
    }

    fn get_all(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }
}

/// Minimal service snapshot with the given step and bird count
fn state_body(step: u64, birds: usize, running: bool) -> Value {
    let birds: Vec<Value> = (0..birds)
        .map(|i| {
            json!({
                "id": format!("bird-{i}"),
                "position": {"x": 10.0 * i as f64, "y": 5.0},
                "velocity": {"dx": 1.0, "dy": 0.0},
                "radius": 5.0
            })
        })
        .collect();
    json!({
        "state": {
            "birds": birds,
            "obstacles": [],
            "attractor": {"position": {"x": 0.0, "y": 0.0}, "active": false},
            "step": step,
            "running": running
        }
    })
}

async fn mount_post(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_advance_step_replaces_snapshot_wholesale() {
    let server = MockServer::start().await;
    mount_post(&server, "/api/step", state_body(7, 2, true)).await;

    let client = SimulationClient::new(server.uri()).unwrap();
    assert_eq!(client.step(), 0);

    client.advance_step().await;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.step, 7);
    assert_eq!(snapshot.birds.len(), 2);
    assert!(snapshot.running);
}

#[tokio::test]
async fn test_submit_obstacle_sends_center_and_radius() {
    let server = MockServer::start().await;
    let received = ReceivedBodies::new();
    let received_clone = received.clone();

    Mock::given(method("POST"))
        .and(path("/api/obstacle"))
        .respond_with(move |req: &wiremock::Request| {
            received_clone.add(serde_json::from_slice(&req.body).unwrap());
            ResponseTemplate::new(200).set_body_json(state_body(1, 0, true))
        })
        .mount(&server)
        .await;

    let client = SimulationClient::new(server.uri()).unwrap();
    client.submit_obstacle(Point::new(50.0, 50.0), 40.0).await;

    assert_eq!(received.count(), 1);
    let body: AddObstacleRequest = serde_json::from_value(received.get_all()[0].clone()).unwrap();
    assert_eq!(
        body,
        AddObstacleRequest {
            x: 50.0,
            y: 50.0,
            radius: 40.0
        }
    );
}

#[tokio::test]
async fn test_submit_attractor_round_trip() {
    let server = MockServer::start().await;
    let received = ReceivedBodies::new();
    let received_clone = received.clone();

    Mock::given(method("POST"))
        .and(path("/api/attractor"))
        .respond_with(move |req: &wiremock::Request| {
            received_clone.add(serde_json::from_slice(&req.body).unwrap());
            ResponseTemplate::new(200).set_body_json(state_body(1, 0, true))
        })
        .mount(&server)
        .await;

    let client = SimulationClient::new(server.uri()).unwrap();
    client.submit_attractor(Point::new(210.0, 205.0), true).await;
    client.submit_attractor(Point::new(0.0, 0.0), false).await;

    let bodies: Vec<SetAttractorRequest> = received
        .get_all()
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();
    assert_eq!(
        bodies,
        vec![
            SetAttractorRequest {
                x: 210.0,
                y: 205.0,
                active: true
            },
            SetAttractorRequest {
                x: 0.0,
                y: 0.0,
                active: false
            },
        ]
    );
}

#[tokio::test]
async fn test_service_rejection_preserves_snapshot() {
    let server = MockServer::start().await;
    mount_post(&server, "/api/step", state_body(3, 1, true)).await;

    let client = SimulationClient::new(server.uri()).unwrap();
    client.advance_step().await;
    assert_eq!(client.step(), 3);

    Mock::given(method("POST"))
        .and(path("/api/bird"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    client.submit_bird_at(Point::new(1.0, 2.0)).await;

    // Held snapshot untouched by the failed command
    assert_eq!(client.step(), 3);
    assert_eq!(client.bird_count(), 1);
}

#[tokio::test]
async fn test_transport_failure_preserves_snapshot_and_next_step_recovers() {
    let server = MockServer::start().await;
    mount_post(&server, "/api/step", state_body(5, 1, true)).await;

    let client = SimulationClient::new(server.uri()).unwrap();
    client.advance_step().await;
    assert_eq!(client.step(), 5);

    // Unreachable endpoint: connection refused
    let dead = SimulationClient::new("http://127.0.0.1:1").unwrap();
    dead.advance_step().await;
    assert_eq!(dead.step(), 0);

    // Malformed body counts as a transport failure too
    Mock::given(method("POST"))
        .and(path("/api/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    client.toggle_running().await;
    assert_eq!(client.step(), 5);
    assert!(client.is_running());

    // The loop's next cycle still attempts a step and self-heals
    client.advance_step().await;
    assert_eq!(client.step(), 5);
    assert_eq!(client.bird_count(), 1);
}

#[tokio::test]
async fn test_last_response_wins_even_when_older() {
    let server = MockServer::start().await;
    mount_post(&server, "/api/step", state_body(10, 4, true)).await;

    Mock::given(method("GET"))
        .and(path("/api/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(state_body(3, 1, true)))
        .mount(&server)
        .await;

    let client = SimulationClient::new(server.uri()).unwrap();
    client.advance_step().await;
    assert_eq!(client.step(), 10);

    // No sequencing token on snapshots: whatever arrives last is
    // authoritative, even if it describes an earlier step.
    client.refresh_snapshot().await;
    assert_eq!(client.step(), 3);
    assert_eq!(client.bird_count(), 1);
}

#[tokio::test]
async fn test_reset_installs_fresh_state() {
    let server = MockServer::start().await;
    mount_post(&server, "/api/step", state_body(20, 6, true)).await;
    mount_post(&server, "/api/reset", state_body(0, 0, true)).await;

    let client = SimulationClient::new(server.uri()).unwrap();
    client.advance_step().await;
    assert_eq!(client.bird_count(), 6);

    client.request_reset().await;
    let snapshot = client.snapshot();
    assert_eq!(snapshot.step, 0);
    assert!(snapshot.birds.is_empty());
    assert!(snapshot.running);
}

#[tokio::test]
async fn test_toggle_flips_running_flag() {
    let server = MockServer::start().await;
    mount_post(&server, "/api/toggle", state_body(2, 0, false)).await;

    let client = SimulationClient::new(server.uri()).unwrap();
    assert!(client.is_running());

    client.toggle_running().await;
    assert!(!client.is_running());
}

#[tokio::test]
async fn test_bird_burst_reflected_in_snapshot_count() {
    let server = MockServer::start().await;
    let received = ReceivedBodies::new();
    let received_clone = received.clone();

    // Each add-bird response reports one more bird than it has seen
    Mock::given(method("POST"))
        .and(path("/api/bird"))
        .respond_with(move |req: &wiremock::Request| {
            received_clone.add(serde_json::from_slice(&req.body).unwrap());
            let count = received_clone.count();
            ResponseTemplate::new(200).set_body_json(state_body(1, count, true))
        })
        .mount(&server)
        .await;

    let client = SimulationClient::new(server.uri()).unwrap();
    for spawn in [
        Point::new(92.0, 108.0),
        Point::new(110.0, 97.0),
        Point::new(101.0, 114.0),
    ] {
        client.submit_bird_at(spawn).await;
    }

    assert_eq!(received.count(), 3);
    assert_eq!(client.bird_count(), 3);
    for body in received.get_all() {
        let x = body["x"].as_f64().unwrap();
        let y = body["y"].as_f64().unwrap();
        assert!((x - 100.0).abs() <= 20.0);
        assert!((y - 100.0).abs() <= 20.0);
    }
}
