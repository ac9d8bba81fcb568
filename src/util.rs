// Licensed under the Apache-2.0 license

//! Utility functions for identifier derivation.
//!
//! This module provides the naming convention shared by every generator that
//! emits one named member per entry: the first instance keeps the bare base
//! name, later instances get the decimal index appended.

/// Derives the member name for the `index`-th instance of a peripheral.
///
/// Index 0 yields the base name unchanged; any later index is appended in
/// decimal. The same convention is used for display instance members and the
/// encoder convenience reference, so a single-entry list always reads as the
/// bare name in consumer code.
///
/// # Examples
/// ```
/// use board_support_generator::util::indexed_name;
/// assert_eq!(indexed_name("display", 0), "display");
/// assert_eq!(indexed_name("display", 1), "display1");
/// assert_eq!(indexed_name("encoder", 12), "encoder12");
/// ```
pub fn indexed_name(base: &str, index: usize) -> String {
    if index == 0 {
        base.to_string()
    } else {
        format!("{base}{index}")
    }
}
