#![allow(dead_code)]

use stegano_core::Carrier;

/// smooth ramps that never touch 0 or 255
pub fn gradient_carrier(width: u32, height: u32, channels: u8) -> Carrier {
    Carrier::from_fn(width, height, channels, |x, y, c| {
        (40 + (x * 3 + y * 2 + u32::from(c) * 29) % 176) as u8
    })
    .expect("gradient carrier")
}

/// deterministic xorshift noise within 16 ..= 239
pub fn noise_carrier(width: u32, height: u32, channels: u8, seed: u32) -> Carrier {
    let mut state = seed | 1;
    Carrier::from_fn(width, height, channels, |_, _, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (16 + state % 224) as u8
    })
    .expect("noise carrier")
}

/// white sky over a dark textured ground that touches 0
pub fn sky_carrier(width: u32, height: u32, channels: u8) -> Carrier {
    Carrier::from_fn(width, height, channels, |x, y, c| {
        if y < height / 2 {
            255
        } else {
            ((x * 13 + y * 7 + u32::from(c) * 5) % 48) as u8
        }
    })
    .expect("sky carrier")
}
