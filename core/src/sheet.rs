//! Sprite sheet metadata as written by TexturePacker and Aseprite.
//!
//! Both the array form (`"frames": [{"filename": .., "frame": ..}]`) and the
//! hash form (`"frames": {"name": {"frame": ..}}`) are accepted. Frame order
//! follows the document in either case.

use alloc::{string::String, vec::Vec};
use core::fmt;

use log::{debug, info};
use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, SeqAccess, Visitor},
};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl FrameRect {
    pub fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    /// True when the rectangle lies entirely inside a `width` x `height` image.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.x.checked_add(self.w).is_some_and(|right| right <= width)
            && self.y.checked_add(self.h).is_some_and(|bottom| bottom <= height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub filename: String,
    pub frame: FrameRect,
    #[serde(default)]
    pub rotated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Spritesheet {
    #[serde(deserialize_with = "frames_in_order")]
    pub frames: Vec<Frame>,
    #[serde(default)]
    pub meta: Meta,
}

impl Spritesheet {
    /// Parses and checks sheet metadata. A sheet without frames is an error.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let sheet: Spritesheet = serde_json::from_slice(data)?;
        if sheet.frames.is_empty() {
            return Err(Error::EmptySheet);
        }
        if let Some(index) = sheet.frames.iter().position(|frame| frame.rotated) {
            return Err(Error::RotatedFrame { index });
        }
        info!(
            "Loaded sprite sheet: {} frame(s), image {:?}",
            sheet.frames.len(),
            sheet.meta.image.as_deref().unwrap_or("<unnamed>")
        );
        for (index, frame) in sheet.frames.iter().enumerate() {
            debug!("Frame {index} '{}': {:?}", frame.filename, frame.frame);
        }
        Ok(sheet)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn frames_in_order<'de, D>(deserializer: D) -> core::result::Result<Vec<Frame>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FramesVisitor;

    impl<'de> Visitor<'de> for FramesVisitor {
        type Value = Vec<Frame>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list of frames or a map of frames keyed by filename")
        }

        fn visit_seq<A>(self, mut seq: A) -> core::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut frames = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(frame) = seq.next_element::<Frame>()? {
                frames.push(frame);
            }
            Ok(frames)
        }

        fn visit_map<A>(self, mut map: A) -> core::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut frames = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, mut frame)) = map.next_entry::<String, Frame>()? {
                if frame.filename.is_empty() {
                    frame.filename = name;
                }
                frames.push(frame);
            }
            Ok(frames)
        }
    }

    deserializer.deserialize_any(FramesVisitor)
}
