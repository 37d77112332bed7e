// src/state.rs
use std::sync::Arc;

use crate::services::chatbot::ChatEngine;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub engine: ChatEngine,
}

impl AppState {
    pub fn new(engine: ChatEngine) -> Self {
        Self { engine }
    }
}
