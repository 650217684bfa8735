//! Fuzzes gamepad classification.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_gamepad_id
#![no_main]
use ihparah_hid::GamepadId;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some(&[v0, v1, p0, p1]) = data.first_chunk::<4>() else {
        return;
    };
    let vid = u16::from_le_bytes([v0, v1]);
    let pid = u16::from_le_bytes([p0, p1]);
    let id = GamepadId::from_vid_pid(vid, pid);
    if id.is_known() {
        assert_eq!((id.vendor_id(), id.product_id()), (vid, pid));
        assert!(id.product_name().is_some());
    }
});
