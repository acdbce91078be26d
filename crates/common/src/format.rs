//! Magnitude formatting used in signal rationales and reports.

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;
const TRILLION: f64 = 1_000_000_000_000.0;

/// Share volume with a K/M/B suffix, keeping the sign (`-2.5M`).
pub fn format_volume(volume: i64) -> String {
    let sign = if volume < 0 { "-" } else { "" };
    let abs = volume.unsigned_abs() as f64;

    if abs >= BILLION {
        format!("{sign}{:.1}B", abs / BILLION)
    } else if abs >= MILLION {
        format!("{sign}{:.1}M", abs / MILLION)
    } else if abs >= THOUSAND {
        format!("{sign}{:.1}K", abs / THOUSAND)
    } else {
        format!("{sign}{}", volume.unsigned_abs())
    }
}

/// Currency amount in rupiah with an M/B/T suffix (`-Rp 3.4B`).
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if abs >= TRILLION {
        format!("{sign}Rp {:.1}T", abs / TRILLION)
    } else if abs >= BILLION {
        format!("{sign}Rp {:.1}B", abs / BILLION)
    } else if abs >= MILLION {
        format!("{sign}Rp {:.1}M", abs / MILLION)
    } else {
        format!("{sign}Rp {abs:.0}")
    }
}

/// Whole-rupiah price (`Rp9450`).
pub fn format_price(price: f64) -> String {
    format!("Rp{price:.0}")
}

/// Five-slot star rating for a 1–5 strength.
pub fn stars(strength: u8) -> String {
    let n = strength.min(5) as usize;
    format!("{}{}", "*".repeat(n), " ".repeat(5 - n))
}
