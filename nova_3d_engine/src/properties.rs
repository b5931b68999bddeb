//! Global runtime toggles with a two-phase commit
//!
//! Writes made during a frame are queued by `set` and only become visible
//! at `flush`, which the frame loop calls once. `flush` diffs every touched
//! key against its value before the flush and notifies the listeners of
//! keys whose value actually changed.

use rustc_hash::FxHashMap;
use winit::dpi::PhysicalSize;

use crate::config::Config;
use crate::engine_warn;

/// Keys of the global property set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Drawable surface size in physical pixels
    WindowSize,
    /// Render every pipeline as wireframe
    Wireframe,
    /// Framebuffer clear color
    ClearColor,
    /// Log culled entities at Info instead of Trace
    ShowCulled,
}

/// A property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Size(PhysicalSize<u32>),
    Bool(bool),
    Color([f32; 4]),
}

impl PropertyKey {
    /// Whether `value` has the shape this key stores
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        matches!(
            (self, value),
            (PropertyKey::WindowSize, PropertyValue::Size(_))
                | (PropertyKey::Wireframe, PropertyValue::Bool(_))
                | (PropertyKey::ShowCulled, PropertyValue::Bool(_))
                | (PropertyKey::ClearColor, PropertyValue::Color(_))
        )
    }
}

/// Handle returned by `Properties::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&PropertyValue)>;

/// Property store
pub struct Properties {
    values: FxHashMap<PropertyKey, PropertyValue>,
    pending: Vec<(PropertyKey, PropertyValue)>,
    listeners: Vec<(ListenerId, PropertyKey, Listener)>,
    next_listener: u32,
}

impl Properties {
    /// Create a store with default values (800x600, no wireframe, black)
    pub fn new() -> Self {
        let mut values = FxHashMap::default();
        values.insert(PropertyKey::WindowSize, PropertyValue::Size(PhysicalSize::new(800, 600)));
        values.insert(PropertyKey::Wireframe, PropertyValue::Bool(false));
        values.insert(PropertyKey::ClearColor, PropertyValue::Color([0.0, 0.0, 0.0, 1.0]));
        values.insert(PropertyKey::ShowCulled, PropertyValue::Bool(false));

        Self {
            values,
            pending: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Create a store seeded from the startup configuration
    pub fn from_config(config: &Config) -> Self {
        let mut properties = Self::new();
        properties.values.insert(PropertyKey::ClearColor, PropertyValue::Color(config.clear_color));
        properties
    }

    /// Current (committed) value
    pub fn get(&self, key: PropertyKey) -> Option<PropertyValue> {
        self.values.get(&key).copied()
    }

    /// Queue a write; it becomes visible at the next `flush`
    pub fn set(&mut self, key: PropertyKey, value: PropertyValue) {
        if !key.accepts(&value) {
            engine_warn!("nova3d::Properties", "Ignoring {:?} for property {:?}", value, key);
            return;
        }
        self.pending.push((key, value));
    }

    /// Whether writes are waiting for `flush`
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Register a callback for changes of one key
    pub fn subscribe<F>(&mut self, key: PropertyKey, callback: F) -> ListenerId
    where
        F: FnMut(&PropertyValue) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, key, Box::new(callback)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Apply queued writes in order and notify listeners of changed keys.
    ///
    /// Returns the changed keys in the order they were first written.
    pub fn flush(&mut self) -> Vec<PropertyKey> {
        if self.pending.is_empty() {
            return Vec::new();
        }

        let mut touched: Vec<(PropertyKey, Option<PropertyValue>)> = Vec::new();
        for (key, value) in std::mem::take(&mut self.pending) {
            if !touched.iter().any(|(k, _)| *k == key) {
                touched.push((key, self.values.get(&key).copied()));
            }
            self.values.insert(key, value);
        }

        let changed: Vec<PropertyKey> = touched
            .into_iter()
            .filter(|(key, previous)| self.values.get(key).copied() != *previous)
            .map(|(key, _)| key)
            .collect();

        for key in &changed {
            if let Some(value) = self.values.get(key).copied() {
                for (_, watched, callback) in self.listeners.iter_mut() {
                    if watched == key {
                        callback(&value);
                    }
                }
            }
        }

        changed
    }

    // ===== TYPED GETTERS =====

    pub fn window_size(&self) -> PhysicalSize<u32> {
        match self.get(PropertyKey::WindowSize) {
            Some(PropertyValue::Size(size)) => size,
            _ => PhysicalSize::new(800, 600),
        }
    }

    pub fn wireframe(&self) -> bool {
        matches!(self.get(PropertyKey::Wireframe), Some(PropertyValue::Bool(true)))
    }

    pub fn show_culled(&self) -> bool {
        matches!(self.get(PropertyKey::ShowCulled), Some(PropertyValue::Bool(true)))
    }

    pub fn clear_color(&self) -> [f32; 4] {
        match self.get(PropertyKey::ClearColor) {
            Some(PropertyValue::Color(color)) => color,
            _ => [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "properties_tests.rs"]
mod tests;
