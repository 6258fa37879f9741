//! SGR parameter interpretation

use super::actions::SgrAttribute;
use super::params::Params;
use crate::core::Color;

/// Turn SGR parameters into attributes, left to right.
///
/// An empty parameter list means reset. Extended colors (`38`/`48`) consume
/// their own sub-parameters so they are never read again as codes.
pub fn parse_sgr(params: &Params) -> Vec<SgrAttribute> {
    if params.is_empty() {
        return vec![SgrAttribute::Reset];
    }

    let mut attrs = Vec::with_capacity(params.len());
    let mut i = 0;

    while i < params.len() {
        let code = params.raw(i);
        let attr = match code {
            0 => SgrAttribute::Reset,
            1 => SgrAttribute::Bold,
            2 => SgrAttribute::Dim,
            4 => SgrAttribute::Underline,
            22 => SgrAttribute::NormalIntensity,
            24 => SgrAttribute::NotUnderlined,
            30..=37 => SgrAttribute::Foreground(Color::indexed((code - 30) as u8)),
            39 => SgrAttribute::DefaultForeground,
            40..=47 => SgrAttribute::Background(Color::indexed((code - 40) as u8)),
            49 => SgrAttribute::DefaultBackground,
            90..=97 => SgrAttribute::Foreground(Color::indexed((code - 90 + 8) as u8)),
            100..=107 => SgrAttribute::Background(Color::indexed((code - 100 + 8) as u8)),
            38 | 48 => {
                let (color, used) = extended_color(params, i);
                i += used;
                match color {
                    Some(color) if code == 38 => SgrAttribute::Foreground(color),
                    Some(color) => SgrAttribute::Background(color),
                    None => {
                        i += 1;
                        continue;
                    }
                }
            }
            _ => SgrAttribute::Unknown(code),
        };
        attrs.push(attr);
        i += 1;
    }

    attrs
}

/// Read the color following a `38`/`48` at `index`.
///
/// Returns the color (if well formed) and how many extra parameters were
/// consumed. A truncated `5`/`2` form swallows the rest of the list; an
/// unknown selector consumes only itself.
fn extended_color(params: &Params, index: usize) -> (Option<Color>, usize) {
    let sub = params.subparams(index);
    if !sub.is_empty() {
        return (color_from_subparams(sub), 0);
    }

    let rest: Vec<u16> = (index + 1..params.len()).map(|j| params.raw(j)).collect();
    match rest.as_slice() {
        [5, n, ..] => (Some(Color::indexed(saturate(*n))), 2),
        [2, r, g, b, ..] => (
            Some(Color::rgb(saturate(*r), saturate(*g), saturate(*b))),
            4,
        ),
        [5 | 2, ..] => {
            tracing::debug!("Truncated extended color: {:?}", rest);
            (None, rest.len())
        }
        [selector, ..] => {
            tracing::debug!("Unknown extended color selector: {}", selector);
            (None, 1)
        }
        [] => (None, 0),
    }
}

/// Colon form: `38:5:N`, `38:2:R:G:B` or `38:2:CS:R:G:B`
fn color_from_subparams(sub: &[u16]) -> Option<Color> {
    match sub {
        [5, n, ..] => Some(Color::indexed(saturate(*n))),
        [2, r, g, b] => Some(Color::rgb(saturate(*r), saturate(*g), saturate(*b))),
        [2, _, r, g, b, ..] => Some(Color::rgb(saturate(*r), saturate(*g), saturate(*b))),
        _ => None,
    }
}

fn saturate(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
