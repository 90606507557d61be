//! Startup banner
//!
//! Sent once, before the first command is read:
//! `<product>: Ready (Type H/L/R/S)\n`. Controllers usually flush it on
//! connect, so only its presence and terminator matter.

use heapless::Vec;

/// Longest accepted product name
pub const MAX_PRODUCT_LEN: usize = 40;

/// Text following the product name
pub const READY_SUFFIX: &str = ": Ready (Type H/L/R/S)\n";

/// Longest possible banner
pub const MAX_BANNER_LEN: usize = MAX_PRODUCT_LEN + READY_SUFFIX.len();

/// A rendered banner line
pub type Banner = Vec<u8, MAX_BANNER_LEN>;

/// Reasons a product name cannot be announced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BannerError {
    /// Name is empty
    EmptyProduct,
    /// Name exceeds [`MAX_PRODUCT_LEN`]
    ProductTooLong,
    /// Name contains a control or non-ASCII character
    InvalidCharacter,
}

/// Check a product name for use in the banner
pub fn validate_product(product: &str) -> Result<(), BannerError> {
    if product.is_empty() {
        return Err(BannerError::EmptyProduct);
    }
    if product.len() > MAX_PRODUCT_LEN {
        return Err(BannerError::ProductTooLong);
    }
    if !product.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
        return Err(BannerError::InvalidCharacter);
    }
    Ok(())
}

/// Render the banner for `product`
pub fn render_banner(product: &str) -> Result<Banner, BannerError> {
    validate_product(product)?;

    let mut banner = Vec::new();
    // Capacity is guaranteed by the length check above
    banner
        .extend_from_slice(product.as_bytes())
        .map_err(|_| BannerError::ProductTooLong)?;
    banner
        .extend_from_slice(READY_SUFFIX.as_bytes())
        .map_err(|_| BannerError::ProductTooLong)?;
    Ok(banner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_PRODUCT;

    #[test]
    fn test_default_banner() {
        let banner = render_banner(DEFAULT_PRODUCT).unwrap();
        assert_eq!(&banner[..], b"MSPM0_HIL_v1.0: Ready (Type H/L/R/S)\n");
    }

    #[test]
    fn test_banner_ends_with_single_newline() {
        let banner = render_banner("Bench A").unwrap();
        assert_eq!(banner.last(), Some(&b'\n'));
        assert_eq!(banner.iter().filter(|&&b| b == b'\n').count(), 1);
    }

    #[test]
    fn test_longest_product_fits() {
        let name = "X".repeat(MAX_PRODUCT_LEN);
        let banner = render_banner(&name).unwrap();
        assert_eq!(banner.len(), MAX_BANNER_LEN);
    }

    #[test]
    fn test_rejected_products() {
        assert_eq!(render_banner(""), Err(BannerError::EmptyProduct));
        let long = "X".repeat(MAX_PRODUCT_LEN + 1);
        assert_eq!(render_banner(&long), Err(BannerError::ProductTooLong));
        assert_eq!(render_banner("a\nb"), Err(BannerError::InvalidCharacter));
        assert_eq!(render_banner("caf\u{e9}"), Err(BannerError::InvalidCharacter));
    }
}
