use rand::Rng;

/// RGBA color, non-premultiplied (straight alpha), each channel 0-255
///
/// Stored as a plain array rather than `image::Rgba` so it serializes directly.
pub type Color = [u8; 4];

/// One channel of a [`Color`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Position of this channel inside a `[u8; 4]` color
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// Random color; every channel (alpha included) is uniform over 0..=255
pub fn random_color(rng: &mut impl Rng) -> Color {
    [
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
    ]
}

/// Replace one uniformly chosen channel with a uniformly random byte
pub fn mutate_color(color: Color, rng: &mut impl Rng) -> Color {
    let channel = Channel::ALL[rng.gen_range(0..Channel::ALL.len())];
    let value = rng.gen_range(0..=255);
    with_channel(color, channel, value)
}

/// Copy of `color` with `channel` set to `value`, the other three untouched
pub fn with_channel(color: Color, channel: Channel, value: u8) -> Color {
    let mut result = color;
    result[channel.index()] = value;
    result
}
