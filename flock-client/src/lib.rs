//! HTTP client for the remote flock simulation service.
//!
//! Every state-mutating gesture becomes exactly one outbound command; the
//! response's snapshot replaces the locally held one wholesale. Commands
//! are never queued against each other: concurrent requests race and the
//! last response to arrive wins. Failures are fail-soft: the command's
//! effect is dropped, the held snapshot stays as it was, and a warning is
//! logged; the next frame's step naturally retries.

use anyhow::{bail, Context, Result};
use flock_shared::{
    AddBirdRequest, AddObstacleRequest, Point, SetAttractorRequest, SimulationResponse,
    SimulationState,
};
use serde::Serialize;
use std::cell::RefCell;

/// Client for the simulation service, holding the latest snapshot.
///
/// Lives on a single cooperative scheduling context (the browser main
/// thread or a current-thread runtime), so interior mutability is a plain
/// `RefCell`; the borrow is never held across an await.
pub struct SimulationClient {
    base_url: String,
    http: reqwest::Client,
    snapshot: RefCell<SimulationState>,
}

impl SimulationClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            base_url,
            http: build_http().context("failed to build HTTP client")?,
            snapshot: RefCell::new(SimulationState::default()),
        })
    }

    /// The latest snapshot received from the service
    pub fn snapshot(&self) -> SimulationState {
        self.snapshot.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.snapshot.borrow().running
    }

    pub fn bird_count(&self) -> usize {
        self.snapshot.borrow().birds.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.snapshot.borrow().obstacles.len()
    }

    pub fn step(&self) -> u64 {
        self.snapshot.borrow().step
    }

    pub async fn submit_bird_at(&self, position: Point) {
        let body = AddBirdRequest {
            x: position.x,
            y: position.y,
        };
        self.command("add bird", self.post_json("/api/bird", &body).await);
    }

    pub async fn submit_obstacle(&self, center: Point, radius: f64) {
        let body = AddObstacleRequest {
            x: center.x,
            y: center.y,
            radius,
        };
        self.command("add obstacle", self.post_json("/api/obstacle", &body).await);
    }

    pub async fn submit_attractor(&self, position: Point, active: bool) {
        let body = SetAttractorRequest {
            x: position.x,
            y: position.y,
            active,
        };
        self.command("set attractor", self.post_json("/api/attractor", &body).await);
    }

    pub async fn toggle_running(&self) {
        self.command("toggle", self.post_empty("/api/toggle").await);
    }

    pub async fn request_reset(&self) {
        self.command("reset", self.post_empty("/api/reset").await);
    }

    pub async fn refresh_snapshot(&self) {
        self.command("fetch state", self.get_state().await);
    }

    /// Advance the simulation by one step. The loop renders the snapshot
    /// held after this returns, which on success is this very response.
    pub async fn advance_step(&self) {
        self.command("step", self.post_empty("/api/step").await);
    }

    fn command(&self, what: &str, result: Result<SimulationState>) {
        match result {
            Ok(state) => self.install(state),
            Err(err) => log::warn!("{} failed: {:#}", what, err),
        }
    }

    /// Wholesale replacement; the previous snapshot is discarded, never
    /// patched.
    fn install(&self, state: SimulationState) {
        *self.snapshot.borrow_mut() = state;
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<SimulationState> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} unreachable", path))?;
        Self::unwrap_state(path, response).await
    }

    async fn post_empty(&self, path: &str) -> Result<SimulationState> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .with_context(|| format!("POST {} unreachable", path))?;
        Self::unwrap_state(path, response).await
    }

    async fn get_state(&self) -> Result<SimulationState> {
        let url = format!("{}/api/state", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("GET /api/state unreachable")?;
        Self::unwrap_state("/api/state", response).await
    }

    async fn unwrap_state(path: &str, response: reqwest::Response) -> Result<SimulationState> {
        let status = response.status();
        if !status.is_success() {
            bail!("{} returned {}", path, status);
        }
        let envelope: SimulationResponse = response
            .json()
            .await
            .with_context(|| format!("{} returned a malformed body", path))?;
        Ok(envelope.state)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build()
}

// The fetch backend has no timeout knob; the browser's own limits apply.
#[cfg(target_arch = "wasm32")]
fn build_http() -> reqwest::Result<reqwest::Client> {
    Ok(reqwest::Client::new())
}
