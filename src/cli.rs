//! Command-line arguments for a single capture/comment cycle.
//!
//! Usage:
//!   screen-companion                          Live capture (needs `screen-capture`)
//!   screen-companion --image shot.png         Comment on an existing image
//!   screen-companion --input "이거 뭐야?"      Add a user question
//!   screen-companion --viewport 1920x1080 --icon 60,60 --content 240x60
//!   screen-companion --save-key <key>         Store the API key in the OS keychain

use crate::layout::{Point, Size};
use std::path::PathBuf;

pub const DEFAULT_VIEWPORT: Size = Size {
    width: 1920.0,
    height: 1080.0,
};

/// Tooltip size assumed when the caller has not measured one.
pub const DEFAULT_CONTENT: Size = Size {
    width: 240.0,
    height: 60.0,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub image: Option<PathBuf>,
    pub input: String,
    pub viewport: Size,
    /// Overrides the stored icon position.
    pub icon: Option<Point>,
    pub content: Size,
    /// Key to store in the keychain. The run exits after saving it.
    pub save_key: Option<String>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            image: None,
            input: String::new(),
            viewport: DEFAULT_VIEWPORT,
            icon: None,
            content: DEFAULT_CONTENT,
            save_key: None,
        }
    }
}

pub const USAGE: &str = "Usage:
  screen-companion [--image <path>] [--input <text>] [--viewport WxH] [--icon X,Y] [--content WxH]
  screen-companion --save-key <key>";

/// Parse arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("{} requires a value", flag))
        };
        match flag.as_str() {
            "--image" => out.image = Some(PathBuf::from(value()?)),
            "--input" => out.input = value()?,
            "--save-key" => out.save_key = Some(value()?),
            "--viewport" => out.viewport = parse_pair(&value()?, 'x').map(size)?,
            "--content" => out.content = parse_pair(&value()?, 'x').map(size)?,
            "--icon" => {
                let (x, y) = parse_pair(&value()?, ',')?;
                out.icon = Some(Point::new(x, y));
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(out)
}

fn size((width, height): (f64, f64)) -> Size {
    Size::new(width, height)
}

fn parse_pair(s: &str, sep: char) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected <a>{sep}<b>, got {:?}", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| format!("not a number: {:?}", v))
    };
    Ok((parse(a)?, parse(b)?))
}
