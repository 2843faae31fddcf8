mod scripted_engine;

pub use scripted_engine::ScriptedEngine;
