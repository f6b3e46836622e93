//! Scripted input sessions
//!
//! A script is a TOML list of frames replayed through the demo scene in
//! place of live window events:
//!
//! ```toml
//! [[frames]]
//! dt = 0.016
//! cursor = [640.0, 360.0]
//! pick = true
//!
//! [[frames]]
//! repeat = 60
//! keys = { forward = true }
//! ```

use anyhow::{Context, Result};
use kestrel_3d::controls::{CursorTracker, InputSnapshot, KeyState};
use kestrel_core::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A replayable input session
#[derive(Debug, Default, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub frames: Vec<ScriptFrame>,
}

/// One scripted frame, optionally repeated
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptFrame {
    /// Seconds since the previous frame
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Cursor position in pixels
    #[serde(default)]
    pub cursor: [f32; 2],
    /// Window focus
    #[serde(default = "default_focused")]
    pub focused: bool,
    #[serde(default)]
    pub keys: KeyState,
    /// Left click this frame
    #[serde(default)]
    pub pick: bool,
    /// Ray debug key (F) pressed this frame
    #[serde(default)]
    pub debug_ray: bool,
    /// Play this frame this many times; clicks fire on the first copy only
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_focused() -> bool {
    true
}

fn default_repeat() -> u32 {
    1
}

impl InputScript {
    /// Load a script from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A click at `cursor` on the first frame, then idle frames
    pub fn single_click(cursor: Vec2, idle_frames: u32) -> Self {
        let click = ScriptFrame {
            cursor: [cursor.x, cursor.y],
            pick: true,
            ..ScriptFrame::idle()
        };
        let idle = ScriptFrame {
            cursor: [cursor.x, cursor.y],
            repeat: idle_frames,
            ..ScriptFrame::idle()
        };
        Self {
            frames: vec![click, idle],
        }
    }

    /// Total frames after expanding repeats
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }

    /// Expand into per-frame `(dt, snapshot)` pairs
    ///
    /// Cursor deltas come from a [`CursorTracker`], so focus changes in the
    /// script behave like real ones.
    pub fn snapshots(&self) -> Vec<(f32, InputSnapshot)> {
        let mut tracker = CursorTracker::new();
        let mut out = Vec::new();

        for frame in &self.frames {
            let cursor = Vec2::new(frame.cursor[0], frame.cursor[1]);
            for copy in 0..frame.repeat {
                let first = copy == 0;
                let snapshot = tracker.snapshot(
                    cursor,
                    frame.focused,
                    frame.keys,
                    frame.pick && first,
                    frame.debug_ray && first,
                );
                out.push((frame.dt, snapshot));
            }
        }

        out
    }
}

impl ScriptFrame {
    fn idle() -> Self {
        Self {
            dt: default_dt(),
            cursor: [0.0, 0.0],
            focused: default_focused(),
            keys: KeyState::default(),
            pick: false,
            debug_ray: false,
            repeat: default_repeat(),
        }
    }
}
