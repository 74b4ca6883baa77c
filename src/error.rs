/// Error type for hexgrids-rs operations.
#[derive(Debug, PartialEq)]
pub enum HexGridError {
    /// Malformed extent (not min <= max on an axis, or non-finite) or non-positive radius.
    InvalidInput(String),
    /// The requested tessellation would produce more hexagons than the configured limit.
    CapacityExceeded { radius: f64, count: usize, limit: usize },
    /// An engine failure annotated with the radius that triggered it.
    ForRadius {
        radius: f64,
        source: Box<HexGridError>,
    },
    /// The hex key has an invalid length.
    InvalidIdentifierLength,
    /// The hex key checksum validation failed.
    InvalidChecksum,
    /// The key version is not supported.
    UnsupportedVersion(u8),
    /// Failed to decode Base64 key.
    Base64DecodeError,
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV writing error.
    CsvError(String),
    /// Job configuration could not be read or is incomplete.
    ConfigError(String),
}

impl std::fmt::Display for HexGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HexGridError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            HexGridError::CapacityExceeded {
                radius,
                count,
                limit,
            } => write!(
                f,
                "Capacity exceeded: radius {} would produce {} hexagons (limit {})",
                radius, count, limit
            ),
            HexGridError::ForRadius { radius, source } => {
                write!(f, "Radius {}: {}", radius, source)
            }
            HexGridError::InvalidIdentifierLength => write!(f, "Invalid identifier length"),
            HexGridError::InvalidChecksum => write!(f, "Invalid checksum"),
            HexGridError::UnsupportedVersion(v) => write!(f, "Unsupported version: {}", v),
            HexGridError::Base64DecodeError => write!(f, "Base64 decode error"),
            HexGridError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            HexGridError::IoError(msg) => write!(f, "IO error: {}", msg),
            HexGridError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            HexGridError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for HexGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HexGridError::ForRadius { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl HexGridError {
    /// Strips any radius annotation and returns the underlying engine error.
    pub fn root(&self) -> &HexGridError {
        match self {
            HexGridError::ForRadius { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_radius_display_names_radius_and_cause() {
        let err = HexGridError::ForRadius {
            radius: 0.0,
            source: Box::new(HexGridError::InvalidInput(
                "radius must be positive".to_string(),
            )),
        };
        let msg = err.to_string();
        assert!(msg.contains("Radius 0"));
        assert!(msg.contains("radius must be positive"));
    }

    #[test]
    fn test_root_unwraps_annotation() {
        let err = HexGridError::ForRadius {
            radius: 5.0,
            source: Box::new(HexGridError::CapacityExceeded {
                radius: 5.0,
                count: 10,
                limit: 2,
            }),
        };
        assert!(matches!(err.root(), HexGridError::CapacityExceeded { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
