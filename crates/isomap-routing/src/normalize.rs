//! Normalization of reachable-range responses into closed polygon rings.

use isomap_core::{Position, Ring};

use crate::error::NormalizeError;
use crate::types::{BoundaryPoint, ReachableRangeResponse};

/// Converts a reachable-range response into a closed [`Ring`] in
/// longitude-first order.
///
/// Boundary points keep the order the provider returned; the provider
/// already emits a simple polygon. When the last point differs from the
/// first, the first is appended to close the loop.
///
/// # Errors
///
/// - [`NormalizeError::MissingBoundary`] if `reachableRange.boundary` is
///   absent or empty.
/// - [`NormalizeError::InvalidRing`] if fewer than three distinct points
///   remain or a coordinate is not finite.
pub fn normalize(response: &ReachableRangeResponse) -> Result<Ring, NormalizeError> {
    let boundary = response
        .reachable_range
        .as_ref()
        .and_then(|range| range.boundary.as_deref())
        .filter(|boundary| !boundary.is_empty())
        .ok_or(NormalizeError::MissingBoundary)?;

    normalize_boundary(boundary)
}

/// Same as [`normalize`] for a bare boundary slice.
///
/// # Errors
///
/// See [`normalize`].
pub fn normalize_boundary(boundary: &[BoundaryPoint]) -> Result<Ring, NormalizeError> {
    if boundary.is_empty() {
        return Err(NormalizeError::MissingBoundary);
    }

    let path = boundary
        .iter()
        .map(|p| Position::new(p.longitude, p.latitude))
        .collect();

    Ok(Ring::from_open_path(path)?)
}
