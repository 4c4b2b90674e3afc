// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared human-readable duration formatting.

/// Format seconds as a short human-readable gap: `"45s"`, `"3m"`, `"2h5m"`, `"1d"`.
///
/// Used in staleness warnings; minutes are shown in the hours range only
/// when non-zero.
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86399 => {
            let m = (secs % 3600) / 60;
            if m > 0 {
                format!("{}h{}m", secs / 3600, m)
            } else {
                format!("{}h", secs / 3600)
            }
        }
        _ => format!("{}d", secs / 86400),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
