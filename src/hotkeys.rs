//! Configurable keyboard shortcuts with YAML persistence.
//!
//! A [`Hotkey`] is a modifier plus a key character; arrow keys and Space are
//! represented by dedicated characters so the whole binding stays a plain
//! serde-friendly pair. Bindings persist to `~/.fourier-paint/hotkeys.yaml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use eframe::egui;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: char,
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self { modifier, key }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            ' ' => "Space".to_string(),
            '↑' => "Up".to_string(),
            '↓' => "Down".to_string(),
            '←' => "Left".to_string(),
            '→' => "Right".to_string(),
            other => other.to_string(),
        };
        if self.modifier == Modifier::None {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifier, key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty hotkey".to_string());
        }
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();
        let last = parts.last().ok_or_else(|| "invalid hotkey".to_string())?;
        let ch = match last.to_lowercase().as_str() {
            "space" => ' ',
            "up" => '↑',
            "down" => '↓',
            "left" => '←',
            "right" => '→',
            _ => last
                .chars()
                .next()
                .ok_or_else(|| "no key char".to_string())?,
        };
        let mods = &parts[..parts.len().saturating_sub(1)];
        let modifier = match mods.len() {
            0 => Modifier::None,
            1 => match mods[0].to_lowercase().as_str() {
                "ctrl" | "control" => Modifier::Ctrl,
                "alt" => Modifier::Alt,
                "shift" => Modifier::Shift,
                other => return Err(format!("unknown modifier '{}'", other)),
            },
            _ => return Err(format!("too many modifiers: {:?}", mods)),
        };
        Ok(Hotkey { modifier, key: ch })
    }
}

/// The full hotkey map. `None` disables a binding.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub pause: Option<Hotkey>,
    /// Toggle follow mode: the view tracks the pen tip and zoom applies.
    pub follow: Option<Hotkey>,
    pub zoom_in: Option<Hotkey>,
    pub zoom_out: Option<Hotkey>,
    pub speed_up: Option<Hotkey>,
    pub slow_down: Option<Hotkey>,
    pub more_circles: Option<Hotkey>,
    pub fewer_circles: Option<Hotkey>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            pause: Some(Hotkey::new(Modifier::None, ' ')),
            follow: Some(Hotkey::new(Modifier::None, 'T')),
            zoom_in: Some(Hotkey::new(Modifier::None, 'W')),
            zoom_out: Some(Hotkey::new(Modifier::None, 'S')),
            speed_up: Some(Hotkey::new(Modifier::None, '→')),
            slow_down: Some(Hotkey::new(Modifier::None, '←')),
            more_circles: Some(Hotkey::new(Modifier::None, '↑')),
            fewer_circles: Some(Hotkey::new(Modifier::None, '↓')),
        }
    }
}

impl Hotkeys {
    pub fn reset_defaults(&mut self) {
        *self = Hotkeys::default();
    }

    pub fn save_to_default_path(&self) -> Result<(), String> {
        let home = std::env::var("HOME").map_err(|e| format!("HOME env var not set: {}", e))?;
        let dir = PathBuf::from(home).join(".fourier-paint");
        if let Err(e) = fs::create_dir_all(&dir) {
            return Err(format!("Failed to create dir {:?}: {}", dir, e));
        }
        let path = dir.join("hotkeys.yaml");
        let s = serde_yaml::to_string(self).map_err(|e| format!("Serialization error: {}", e))?;
        let mut f = fs::File::create(&path)
            .map_err(|e| format!("Failed to create file {:?}: {}", path, e))?;
        f.write_all(s.as_bytes())
            .map_err(|e| format!("Failed to write file {:?}: {}", path, e))?;
        Ok(())
    }

    pub fn load_from_default_path() -> Result<Hotkeys, String> {
        let home = std::env::var("HOME").map_err(|e| format!("HOME env var not set: {}", e))?;
        let path = PathBuf::from(home)
            .join(".fourier-paint")
            .join("hotkeys.yaml");
        if !path.exists() {
            return Err(format!("Hotkeys file {:?} does not exist", path));
        }
        let s =
            fs::read_to_string(&path).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        let hk: Hotkeys =
            serde_yaml::from_str(&s).map_err(|e| format!("Deserialization error: {}", e))?;
        Ok(hk)
    }
}

/// Actions triggered by the hotkey map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyAction {
    Pause,
    Follow,
    ZoomIn,
    ZoomOut,
    SpeedUp,
    SlowDown,
    MoreCircles,
    FewerCircles,
}

fn key_from_char(c: char) -> Option<egui::Key> {
    match c {
        ' ' => Some(egui::Key::Space),
        '↑' => Some(egui::Key::ArrowUp),
        '↓' => Some(egui::Key::ArrowDown),
        '←' => Some(egui::Key::ArrowLeft),
        '→' => Some(egui::Key::ArrowRight),
        other => egui::Key::from_name(&other.to_ascii_uppercase().to_string()),
    }
}

fn modifiers_match(mods: &egui::Modifiers, modifier: Modifier) -> bool {
    let ctrl = mods.ctrl || mods.command;
    let alt = mods.alt;
    let shift = mods.shift;
    match modifier {
        Modifier::None => !ctrl && !alt,
        Modifier::Ctrl => ctrl && !alt,
        Modifier::Alt => alt && !ctrl,
        Modifier::Shift => shift && !ctrl && !alt,
    }
}

fn is_hotkey_pressed(hk: Option<&Hotkey>, input: &egui::InputState) -> bool {
    let Some(hk) = hk else { return false };
    let Some(key) = key_from_char(hk.key) else {
        return false;
    };
    if !modifiers_match(&input.modifiers, hk.modifier) {
        return false;
    }
    input.key_pressed(key)
}

/// Scan this frame's input for configured hotkeys. Suppressed while a text
/// widget has keyboard focus.
pub fn detect_hotkey_actions(cfg: &Hotkeys, ctx: &egui::Context) -> Vec<HotkeyAction> {
    let mut actions: Vec<HotkeyAction> = Vec::new();
    if ctx.wants_keyboard_input() {
        return actions;
    }
    let input = ctx.input(|i| i.clone());

    let bindings: [(Option<&Hotkey>, HotkeyAction); 8] = [
        (cfg.pause.as_ref(), HotkeyAction::Pause),
        (cfg.follow.as_ref(), HotkeyAction::Follow),
        (cfg.zoom_in.as_ref(), HotkeyAction::ZoomIn),
        (cfg.zoom_out.as_ref(), HotkeyAction::ZoomOut),
        (cfg.speed_up.as_ref(), HotkeyAction::SpeedUp),
        (cfg.slow_down.as_ref(), HotkeyAction::SlowDown),
        (cfg.more_circles.as_ref(), HotkeyAction::MoreCircles),
        (cfg.fewer_circles.as_ref(), HotkeyAction::FewerCircles),
    ];
    for (hk, action) in bindings {
        if is_hotkey_pressed(hk, &input) && !actions.contains(&action) {
            actions.push(action);
        }
    }
    actions
}
