//! Animation parameter sink
//!
//! The simulation writes named parameters; an external animator consumes
//! them. The sink is write-mostly: only layer weights can be read back.

use rustc_hash::FxHashMap;

/// Interface to an external animator's parameter table
pub trait AnimationSink {
    /// Write a boolean parameter
    fn set_bool(&mut self, name: &str, value: bool);

    /// Write a float parameter
    fn set_float(&mut self, name: &str, value: f32);

    /// Write an integer parameter
    fn set_int(&mut self, name: &str, value: i32);

    /// Write an animation layer's blend weight
    fn set_layer_weight(&mut self, layer: usize, weight: f32);

    /// Read back an animation layer's blend weight (0.0 when never written)
    fn layer_weight(&self, layer: usize) -> f32;
}

/// Recording sink storing the latest value of every parameter.
///
/// Doubles as a staging buffer for engine bridges and as the observable
/// sink in tests.
#[derive(Debug, Clone, Default)]
pub struct ParameterBuffer {
    bools: FxHashMap<String, bool>,
    floats: FxHashMap<String, f32>,
    ints: FxHashMap<String, i32>,
    layers: FxHashMap<usize, f32>,
}

impl ParameterBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest boolean value written under `name`
    #[must_use]
    pub fn bool_param(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Latest float value written under `name`
    #[must_use]
    pub fn float_param(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Latest integer value written under `name`
    #[must_use]
    pub fn int_param(&self, name: &str) -> Option<i32> {
        self.ints.get(name).copied()
    }

    /// Total number of distinct parameters written
    #[must_use]
    pub fn len(&self) -> usize {
        self.bools.len() + self.floats.len() + self.ints.len() + self.layers.len()
    }

    /// Whether nothing has been written yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all recorded parameters
    pub fn clear(&mut self) {
        self.bools.clear();
        self.floats.clear();
        self.ints.clear();
        self.layers.clear();
    }
}

impl AnimationSink for ParameterBuffer {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.ints.insert(name.to_string(), value);
    }

    fn set_layer_weight(&mut self, layer: usize, weight: f32) {
        self.layers.insert(layer, weight);
    }

    fn layer_weight(&self, layer: usize) -> f32 {
        self.layers.get(&layer).copied().unwrap_or(0.0)
    }
}
