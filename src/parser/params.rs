//! CSI parameter parsing
//!
//! Handles parsing of semicolon-separated numeric parameters in CSI sequences.

/// Maximum number of parameters we'll track
const MAX_PARAMS: usize = 32;

/// CSI parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    /// Parameter values (`None` for empty or malformed fields)
    values: Vec<Option<u16>>,
    /// Colon-separated subparameters following each value
    subparams: Vec<Vec<u16>>,
}

impl Params {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse parameters from the bytes between `ESC [` and the final byte.
    ///
    /// Fields are separated by `;`. Within a field, `:` introduces
    /// subparameters. A field containing anything other than digits and
    /// colons is malformed and reads as unset.
    pub fn parse(bytes: &[u8]) -> Self {
        let mut params = Self::new();
        if bytes.is_empty() {
            return params;
        }

        for field in bytes.split(|&b| b == b';').take(MAX_PARAMS) {
            if field.iter().any(|b| !b.is_ascii_digit() && *b != b':') {
                params.values.push(None);
                params.subparams.push(Vec::new());
                continue;
            }

            let mut parts = field.split(|&b| b == b':');
            let value = parts.next().and_then(parse_number);
            let subparams = parts.map(|p| parse_number(p).unwrap_or(0)).collect();

            params.values.push(value);
            params.subparams.push(subparams);
        }

        params
    }

    /// Get parameter at index, treating unset and zero as absent
    pub fn get(&self, index: usize) -> Option<u16> {
        self.values.get(index).copied().flatten().filter(|&v| v != 0)
    }

    /// Get parameter at index with default value
    pub fn get_or(&self, index: usize, default: u16) -> u16 {
        self.get(index).unwrap_or(default)
    }

    /// Get raw value at index (0 if unset or not present)
    pub fn raw(&self, index: usize) -> u16 {
        self.values.get(index).copied().flatten().unwrap_or(0)
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get subparameters for a parameter
    pub fn subparams(&self, index: usize) -> &[u16] {
        self.subparams.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over raw parameter values
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.values.iter().map(|v| v.unwrap_or(0))
    }
}

fn parse_number(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() {
        return None;
    }
    Some(digits.iter().fold(0u16, |acc, &d| {
        acc.saturating_mul(10).saturating_add(u16::from(d - b'0'))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_empty() {
        let params = Params::parse(b"");
        assert!(params.is_empty());
        assert_eq!(params.get_or(0, 1), 1);
    }

    #[test]
    fn test_params_single() {
        let params = Params::parse(b"42");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get(0), Some(42));
    }

    #[test]
    fn test_params_multiple_with_empty_fields() {
        let params = Params::parse(b"1;;3;");
        assert_eq!(params.len(), 4);
        assert_eq!(params.raw(0), 1);
        assert_eq!(params.get(1), None);
        assert_eq!(params.raw(1), 0);
        assert_eq!(params.raw(2), 3);
        assert_eq!(params.get(3), None);
    }

    #[test]
    fn test_params_zero_reads_as_default() {
        let params = Params::parse(b"0");
        assert_eq!(params.get(0), None);
        assert_eq!(params.get_or(0, 1), 1);
        assert_eq!(params.raw(0), 0);
    }

    #[test]
    fn test_params_subparams() {
        let params = Params::parse(b"38:2::255:128:0;1");
        assert_eq!(params.len(), 2);
        assert_eq!(params.raw(0), 38);
        assert_eq!(params.subparams(0), &[2, 0, 255, 128, 0]);
        assert_eq!(params.raw(1), 1);
        assert!(params.subparams(1).is_empty());
    }

    #[test]
    fn test_params_malformed_field_is_unset() {
        let params = Params::parse(b"1;2?;3");
        assert_eq!(params.len(), 3);
        assert_eq!(params.raw(0), 1);
        assert_eq!(params.get(1), None);
        assert_eq!(params.raw(2), 3);
    }

    #[test]
    fn test_params_overflow_saturates() {
        let params = Params::parse(b"99999999");
        assert_eq!(params.get(0), Some(u16::MAX));
    }

    #[test]
    fn test_params_capped() {
        let input = vec!["1"; 64].join(";");
        let params = Params::parse(input.as_bytes());
        assert_eq!(params.len(), MAX_PARAMS);
    }
}
