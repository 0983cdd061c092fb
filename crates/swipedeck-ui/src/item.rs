use std::fmt;
use std::rc::Rc;

/// Opaque reference to an image the host knows how to load.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageResource(Rc<str>);

impl ImageResource {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Rc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageResource {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static input for one card: what it shows and how it rests.
#[derive(Clone, Debug, PartialEq)]
pub struct CardItem {
    image: ImageResource,
    rotation_degrees: f32,
}

impl CardItem {
    pub fn new(image: impl Into<ImageResource>, rotation_degrees: f32) -> Self {
        Self {
            image: image.into(),
            rotation_degrees,
        }
    }

    pub fn image(&self) -> &ImageResource {
        &self.image
    }

    /// In-plane rotation the card settles at, degrees.
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }
}
