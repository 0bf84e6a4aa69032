//! # ESC/POS Control Commands
//!
//! This module implements the ESC/POS control commands used by thermal
//! receipt printers (Epson TM series and the many compatibles found in
//! point-of-sale installations).
//!
//! ## Protocol Overview
//!
//! ESC/POS commands are byte sequences starting with escape characters.
//! The subset implemented here covers what the ticket pipeline needs:
//!
//! - **Initialization**: reset the printer to power-on defaults
//! - **Paper control**: line feeds and the end-of-ticket cut
//!
//! Text itself is sent as plain bytes; the ticket layout engine does all
//! alignment in software with a fixed-width column model, so no text styling
//! commands are required on the wire.
//!
//! ## Escape Sequence Structure
//!
//! | Pattern | Example |
//! |---------|---------|
//! | Single byte | `LF` |
//! | Two bytes | `ESC @` |
//! | Multi-byte with parameters | `GS V m n` |

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for extended commands such as paper cut:
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// Prints any data in the line buffer and advances paper by one line.
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Sent at the start of
/// each print job to ensure consistent behavior.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Text formatting disabled
/// - Line spacing reset to default
///
/// ## Example
///
/// ```
/// use imprenta::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Feed and Partial Cut (GS V 66 0)
///
/// Feeds paper to the cutter position and performs a partial cut, leaving a
/// small hinge so the receipt tears cleanly without falling. This is the
/// fixed 4-byte terminator appended to every rendered ticket.
///
/// ## Protocol Details
///
/// | Format  | Bytes       |
/// |---------|-------------|
/// | ASCII   | GS V B NUL  |
/// | Hex     | 1D 56 42 00 |
/// | Decimal | 29 86 66 0  |
///
/// ## Example
///
/// ```
/// use imprenta::protocol::commands;
///
/// let cut = commands::cut();
/// assert_eq!(cut, vec![0x1D, 0x56, 66, 0]);
/// assert_eq!(cut.len(), 4);
/// ```
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', 66, 0]
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Line Feed (LF)
///
/// Prints the line buffer and advances one line.
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

/// # Feed n Lines (ESC d n)
///
/// Prints the line buffer and feeds `n` lines forward. Used for spacing
/// between ticket sections and before the cut.
///
/// ## Protocol Details
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC d n |
/// | Hex     | 1B 64 n |
/// | Decimal | 27 100 n |
///
/// ## Example
///
/// ```
/// use imprenta::protocol::commands;
///
/// let feed = commands::feed_lines(3);
/// assert_eq!(feed, vec![0x1B, 0x64, 3]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_cut_is_four_bytes() {
        let cut = cut();
        assert_eq!(cut, vec![0x1D, 0x56, 0x42, 0x00]);
        assert_eq!(cut.len(), 4);
    }

    #[test]
    fn test_line_feed() {
        assert_eq!(line_feed(), vec![0x0A]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(0), vec![0x1B, 0x64, 0x00]);
        assert_eq!(feed_lines(3), vec![0x1B, 0x64, 0x03]);
        assert_eq!(feed_lines(255), vec![0x1B, 0x64, 0xFF]);
    }
}
