//! "First non-empty wins" resolution over ordered override layers.
//!
//! Every precedence chain in the system (tour > dataset > global default for
//! styles, legend text, tile servers, zoom limits) goes through
//! [`first_present`]. Layers are listed highest priority first.

/// A value that may be set but still count as absent, e.g. an empty string.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl Presence for f64 {
    fn is_present(&self) -> bool {
        self.is_finite()
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        true
    }
}

impl Presence for u8 {
    fn is_present(&self) -> bool {
        true
    }
}

impl<T: Presence> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Return the first layer holding a present value.
///
/// ```
/// use tourmap_core::layering::first_present;
///
/// let tour: Option<String> = Some(String::new());
/// let dataset = Some("Harbours".to_string());
/// let resolved = first_present([tour.as_ref(), dataset.as_ref()]);
/// assert_eq!(resolved.map(String::as_str), Some("Harbours"));
/// ```
pub fn first_present<'a, T, I>(layers: I) -> Option<&'a T>
where
    T: Presence + ?Sized + 'a,
    I: IntoIterator<Item = Option<&'a T>>,
{
    layers.into_iter().flatten().find(|value| value.is_present())
}

/// Like [`first_present`], falling back to `default` when no layer is present.
pub fn first_present_or<'a, T, I>(layers: I, default: &'a T) -> &'a T
where
    T: Presence + ?Sized + 'a,
    I: IntoIterator<Item = Option<&'a T>>,
{
    first_present(layers).unwrap_or(default)
}
