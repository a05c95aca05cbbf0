/// Straight (non-premultiplied) RGBA, 16 bits per channel. 8-bit sources
/// widen by `c * 257`.
pub type Rgba = [u16; 4];

/// Scales the colour channels by alpha.
pub fn premultiply([r, g, b, a]: Rgba) -> Rgba {
    let scale = |c: u16| (u32::from(c) * u32::from(a) / 0xffff) as u16;
    [scale(r), scale(g), scale(b), a]
}

/// Default foreground rule: any premultiplied channel is non-zero. A fully
/// transparent pixel is background whatever colour it stores.
pub fn is_foreground(pixel: Rgba) -> bool {
    premultiply(pixel) != [0; 4]
}

/// Any stored channel is non-zero, colour under zero alpha included.
pub fn any_straight_channel(pixel: Rgba) -> bool {
    pixel != [0; 4]
}

/// How a decoded pixel collapses to one bit.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Threshold {
    #[default]
    Premultiplied,
    Straight,
}

impl Threshold {
    pub fn test(self, pixel: Rgba) -> bool {
        match self {
            Threshold::Premultiplied => is_foreground(pixel),
            Threshold::Straight => any_straight_channel(pixel),
        }
    }
}
