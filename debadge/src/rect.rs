use std::str::FromStr;

use thiserror::Error;

/// Rectangle descriptor in pixel coordinates, origin at the image's
/// top-left corner, y increasing downward.
///
/// Extents carry no sign constraint at parse time; a negative or zero
/// width/height simply clamps to an empty region during rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RectParseError {
    #[error("rect must be x,y,w,h")]
    Format,
    #[error("rect values must be integers")]
    Value,
}

impl FromStr for Rect {
    type Err = RectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(RectParseError::Format);
        }
        let mut fields = [0i32; 4];
        for (field, part) in fields.iter_mut().zip(&parts) {
            *field = part.trim().parse().map_err(|_| RectParseError::Value)?;
        }
        let [x, y, w, h] = fields;
        Ok(Rect { x, y, w, h })
    }
}
