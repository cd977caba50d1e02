//! Poses and Shapes
//!
//! A pose is a named emotional expression mapped to a fixed triple of
//! shape glyphs (left eye, mouth, right eye). The table is static and
//! never mutated at runtime; every name outside the known set resolves
//! to the default pose, so pose lookup has no error path.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named emotional expressions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Pose {
    /// Neutral resting face
    #[default]
    Default,
    /// Celebration / all clear
    Happy,
    /// A couple of problems
    Disappointed,
    /// Things are getting out of hand
    Shocked,
    /// Grumbling
    Grumpy,
    /// A single problem
    Sad,
    /// Many problems
    Cry,
    /// Playful wink
    Wink,
}

impl Pose {
    /// Parse a pose name, falling back to `Default` for anything unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" => Self::Default,
            "happy" => Self::Happy,
            "disappointed" => Self::Disappointed,
            "shocked" => Self::Shocked,
            "grumpy" => Self::Grumpy,
            "sad" => Self::Sad,
            "cry" => Self::Cry,
            "wink" => Self::Wink,
            _ => Self::Default,
        }
    }

    /// The pose name as it appears on the wire
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Happy => "happy",
            Self::Disappointed => "disappointed",
            Self::Shocked => "shocked",
            Self::Grumpy => "grumpy",
            Self::Sad => "sad",
            Self::Cry => "cry",
            Self::Wink => "wink",
        }
    }

    /// The fixed shape triple for this pose
    #[must_use]
    pub fn shapes(&self) -> ShapeTriple {
        use Shape::*;
        match self {
            Self::Default => ShapeTriple::new(Circle, HalfUp, Circle),
            Self::Happy => ShapeTriple::new(HalfDown, HalfUp, HalfDown),
            Self::Disappointed => ShapeTriple::new(HalfUp, BarBottom, HalfUp),
            Self::Shocked => ShapeTriple::new(CircleStroke, Bar, CircleStroke),
            Self::Grumpy => ShapeTriple::new(BarTop, HalfDown, BarTop),
            Self::Sad => ShapeTriple::new(Circle, HalfDownBottom, Circle),
            Self::Cry => ShapeTriple::new(HalfDown, Square, HalfDown),
            Self::Wink => ShapeTriple::new(Circle, HalfUp, Bar),
        }
    }
}

impl Serialize for Pose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// Pose names arrive as free-form strings; unknown names resolve to the
// default pose rather than failing the whole message.
impl<'de> Deserialize<'de> for Pose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Glyph tokens a face region can display
///
/// These carry no semantics beyond "select this glyph"; the surface
/// maps each one to a block-art pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    Circle,
    CircleSmall,
    CircleStroke,
    HalfUp,
    HalfDown,
    HalfDownBottom,
    Bar,
    BarTop,
    BarBottom,
    Square,
    SquareSmall,
}

impl Shape {
    /// Parse a wire token. Unlike pose names, an unknown shape token
    /// is a `None`, not a fallback; the caller decides what a bad
    /// triple means.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "circle" => Self::Circle,
            "circle-small" => Self::CircleSmall,
            "circle-stroke" => Self::CircleStroke,
            "half-up" => Self::HalfUp,
            "half-down" => Self::HalfDown,
            "half-down-bottom" => Self::HalfDownBottom,
            "bar" => Self::Bar,
            "bar-top" => Self::BarTop,
            "bar-bottom" => Self::BarBottom,
            "square" => Self::Square,
            "square-small" => Self::SquareSmall,
            _ => return None,
        })
    }

    /// The shape token as it appears on the wire
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::CircleSmall => "circle-small",
            Self::CircleStroke => "circle-stroke",
            Self::HalfUp => "half-up",
            Self::HalfDown => "half-down",
            Self::HalfDownBottom => "half-down-bottom",
            Self::Bar => "bar",
            Self::BarTop => "bar-top",
            Self::BarBottom => "bar-bottom",
            Self::Square => "square",
            Self::SquareSmall => "square-small",
        }
    }
}

/// The three glyphs applied to (left eye, mouth, right eye)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeTriple {
    pub left_eye: Shape,
    pub mouth: Shape,
    pub right_eye: Shape,
}

impl ShapeTriple {
    /// Create a triple
    #[must_use]
    pub const fn new(left_eye: Shape, mouth: Shape, right_eye: Shape) -> Self {
        Self {
            left_eye,
            mouth,
            right_eye,
        }
    }

    /// Parse a `"<eye> <mouth> <eye>"` attribute string.
    ///
    /// This is the direct-shapes interface: a host can name exact
    /// glyphs for the resting display instead of a pose. Any unknown
    /// token, or the wrong number of tokens, rejects the whole triple.
    #[must_use]
    pub fn from_tokens(s: &str) -> Option<Self> {
        let mut tokens = s.split_whitespace();
        let left_eye = Shape::from_token(tokens.next()?)?;
        let mouth = Shape::from_token(tokens.next()?)?;
        let right_eye = Shape::from_token(tokens.next()?)?;
        if tokens.next().is_some() {
            return None;
        }
        Some(Self::new(left_eye, mouth, right_eye))
    }

    /// The triple as a `"<eye> <mouth> <eye>"` attribute string
    #[must_use]
    pub fn to_tokens(&self) -> String {
        format!(
            "{} {} {}",
            self.left_eye.token(),
            self.mouth.token(),
            self.right_eye.token()
        )
    }
}

/// Eye shapes the talk loop draws from (six entries, duplicates intended)
pub const TALK_EYES: [Shape; 6] = [
    Shape::Circle,
    Shape::HalfDown,
    Shape::CircleSmall,
    Shape::CircleSmall,
    Shape::Square,
    Shape::CircleStroke,
];

/// Mouth shapes the talk loop draws from (six entries, duplicates intended)
pub const TALK_MOUTHS: [Shape; 6] = [
    Shape::CircleSmall,
    Shape::Square,
    Shape::SquareSmall,
    Shape::Bar,
    Shape::CircleSmall,
    Shape::SquareSmall,
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_triple() {
        let t = Pose::Default.shapes();
        assert_eq!(t.left_eye, Shape::Circle);
        assert_eq!(t.mouth, Shape::HalfUp);
        assert_eq!(t.right_eye, Shape::Circle);
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(Pose::from_name("confused"), Pose::Default);
        assert_eq!(Pose::from_name(""), Pose::Default);
        assert_eq!(Pose::from_name("HAPPY"), Pose::Default);
        assert_eq!(Pose::from_name("confused").shapes(), Pose::Default.shapes());
    }

    #[test]
    fn test_known_names_round_trip() {
        for pose in [
            Pose::Default,
            Pose::Happy,
            Pose::Disappointed,
            Pose::Shocked,
            Pose::Grumpy,
            Pose::Sad,
            Pose::Cry,
            Pose::Wink,
        ] {
            assert_eq!(Pose::from_name(pose.name()), pose);
        }
    }

    #[test]
    fn test_wink_is_asymmetric() {
        let t = Pose::Wink.shapes();
        assert_eq!(t.left_eye, Shape::Circle);
        assert_eq!(t.right_eye, Shape::Bar);
    }

    #[test]
    fn test_unknown_name_on_the_wire_falls_back() {
        let pose: Pose = serde_json::from_str(r#""confused""#).unwrap();
        assert_eq!(pose, Pose::Default);
        let pose: Pose = serde_json::from_str(r#""wink""#).unwrap();
        assert_eq!(pose, Pose::Wink);
    }

    #[test]
    fn test_triple_parses_from_attribute_string() {
        let triple = ShapeTriple::from_tokens("circle half-up circle").unwrap();
        assert_eq!(triple, Pose::Default.shapes());

        let triple = ShapeTriple::from_tokens("  bar-top   half-down bar-top ").unwrap();
        assert_eq!(triple, Pose::Grumpy.shapes());

        assert_eq!(triple.to_tokens(), "bar-top half-down bar-top");
    }

    #[test]
    fn test_bad_triple_strings_are_rejected() {
        assert_eq!(ShapeTriple::from_tokens(""), None);
        assert_eq!(ShapeTriple::from_tokens("circle half-up"), None);
        assert_eq!(ShapeTriple::from_tokens("circle half-up circle circle"), None);
        assert_eq!(ShapeTriple::from_tokens("circle triangle circle"), None);
    }

    #[test]
    fn test_talk_palettes_have_six_entries() {
        assert_eq!(TALK_EYES.len(), 6);
        assert_eq!(TALK_MOUTHS.len(), 6);
    }
}
