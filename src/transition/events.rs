/// Events a host delivers to a transition on its single event queue.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Pointer entered the container.
    PointerEnter,
    /// Pointer left the container.
    PointerLeave,
    /// Container resized, in device-independent pixels.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Manual forward trigger.
    Next,
    /// Manual backward trigger.
    Previous,
    /// Container torn down.
    Dispose,
}

#[cfg(test)]
#[path = "../../tests/unit/transition/events.rs"]
mod tests;
