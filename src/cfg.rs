//! Process-wide switches for the command channel.
use core::sync::atomic::AtomicBool;

use crate::macros::cfg_value;

// Logs every encoded and decoded frame at trace level.
cfg_value!(
    TRACE_FRAMES,
    AtomicBool,
    bool,
    false,
    set: pub set,
    get: pub should
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_frames_toggle() {
        assert!(!should_trace_frames());
        set_trace_frames(true);
        assert!(should_trace_frames());
        set_trace_frames(false);
        assert!(!should_trace_frames());
    }
}
