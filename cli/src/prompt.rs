use std::io::{self, BufRead, Write};

use gridwalk_core::{Point, Range};
use gridwalk_paths::{InvalidInput, ReferenceMap, validate_endpoints};

/// A line that does not hold four integer coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("expected 4 numbers (start x, start y, goal x, goal y), got {0}")]
    WrongCount(usize),
    #[error("{0:?} is not an integer")]
    NotAnInteger(String),
}

/// Validated endpoints of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub start: Point,
    pub goal: Point,
}

impl Request {
    pub fn from_coordinates([sx, sy, gx, gy]: [i32; 4]) -> Self {
        Self {
            start: Point::new(sx, sy),
            goal: Point::new(gx, gy),
        }
    }
}

/// Splits `line` on whitespace or commas into exactly four integers.
pub fn parse_coordinates(line: &str) -> Result<[i32; 4], PromptError> {
    let words: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect();
    if words.len() != 4 {
        return Err(PromptError::WrongCount(words.len()));
    }
    let mut coords = [0; 4];
    for (slot, w) in coords.iter_mut().zip(&words) {
        *slot = w
            .parse()
            .map_err(|_| PromptError::NotAnInteger((*w).to_owned()))?;
    }
    Ok(coords)
}

/// Human-readable reason for rejecting a request, naming the shape hit.
pub fn explain(map: &ReferenceMap, err: &InvalidInput) -> String {
    match err {
        InvalidInput::InsideObstacle { position, .. } => match map.shape_at(*position) {
            Some(shape) => format!("{err} ({shape})"),
            None => err.to_string(),
        },
        _ => err.to_string(),
    }
}

/// Validates `req` against the map, explaining a rejection.
pub fn check_request(
    bounds: Range,
    map: &ReferenceMap,
    req: Request,
) -> Result<Request, String> {
    match validate_endpoints(bounds, map, req.start, req.goal) {
        Ok(()) => Ok(req),
        Err(e) => {
            log::debug!("rejected {} -> {}: {e}", req.start, req.goal);
            Err(explain(map, &e))
        }
    }
}

/// Prompts on `out` until `input` yields a usable request.
///
/// Malformed lines and rejected endpoints are reported and asked again.
/// Returns `None` at end of input.
pub fn read_request<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    bounds: Range,
    map: &ReferenceMap,
) -> io::Result<Option<Request>> {
    let mut line = String::new();
    loop {
        writeln!(out, "Enter the start and goal coordinates")?;
        write!(out, "start_x start_y goal_x goal_y (eg: 5 5 140 14): ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        let coords = match parse_coordinates(&line) {
            Ok(c) => c,
            Err(e) => {
                writeln!(out, "{e}. Please try again.")?;
                continue;
            }
        };
        match check_request(bounds, map, Request::from_coordinates(coords)) {
            Ok(req) => return Ok(Some(req)),
            Err(reason) => writeln!(out, "{reason}. Please try again.")?,
        }
    }
}
