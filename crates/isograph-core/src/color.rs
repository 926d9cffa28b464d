//! Color handling for Isograph scenes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Besides CSS parsing it offers the small amount of
//! color math the isometric renderer needs: face shading and hex output.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#4fc3f7",
    /// "rgb(79, 195, 247)" or "steelblue".
    ///
    /// # Examples
    ///
    /// ```
    /// use isograph_core::color::Color;
    ///
    /// let cyan = Color::new("#4fc3f7").unwrap();
    /// let steel = Color::new("steelblue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (opacity) value,
    /// between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns this color with its sRGB channels multiplied by `factor`.
    ///
    /// Used to darken (`factor < 1`) or lighten (`factor > 1`) the side
    /// faces of isometric shapes. Channels are clamped to `[0, 1]` and the
    /// alpha component is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use isograph_core::color::Color;
    ///
    /// let white = Color::new("white").unwrap();
    /// assert_eq!(white.shade(0.5).to_hex(), "#808080");
    /// ```
    pub fn shade(self, factor: f32) -> Self {
        let srgb: AlphaColor<Srgb> = self.color.to_alpha_color();
        let [r, g, b, a] = srgb.components;
        let channel = |value: f32| (value * factor).clamp(0.0, 1.0);
        let shaded = AlphaColor::<Srgb>::new([channel(r), channel(g), channel(b), a]);
        Color {
            color: DynamicColor::from_alpha_color(shaded),
        }
    }

    /// Returns the opaque `#rrggbb` form of this color.
    ///
    /// Opacity is emitted separately by renderers, see [`Color::alpha`].
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#4fc3f7").is_ok());
        assert!(Color::new("rgb(10, 20, 30)").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_from_str() {
        let parsed: Color = "red".parse().unwrap();
        assert_eq!(parsed, Color::new("red").unwrap());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_hex(), "#000000");
    }

    #[test]
    fn test_color_with_alpha() {
        let transparent = Color::new("red").unwrap().with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::new("#4fc3f7").unwrap().to_hex(), "#4fc3f7");
        assert_eq!(Color::new("red").unwrap().to_hex(), "#ff0000");
    }

    #[test]
    fn test_color_shade_preserves_alpha() {
        let color = Color::new("#ff0000").unwrap().with_alpha(0.25);
        let darker = color.shade(0.5);

        assert_eq!(darker.to_hex(), "#800000");
        assert!((darker.alpha() - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_color_shade_clamps() {
        let lighter = Color::new("#808080").unwrap().shade(4.0);
        assert_eq!(lighter.to_hex(), "#ffffff");
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Color::new("red").unwrap());
        assert!(set.contains(&Color::new("red").unwrap()));
        assert!(!set.contains(&Color::new("blue").unwrap()));
    }
}
