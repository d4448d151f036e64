//! Resolution of horizontal shorthand into concrete values.

use super::HorizontalToken;
use crate::error::{DeckError, Result};
use crate::expand::DEFAULT_MAX_EXPANSION;

/// Resolve a field sequence into values.
///
/// Plain numbers stand for themselves and jumps produce `None` (the reader's
/// default). Repeat and multiply act on the previous value; interpolation
/// fills values between the previous and the next number. Consecutive bare
/// interpolation markers of one kind combine, so `1 i i 4` and `1 2i 4` both
/// resolve to `1 2 3 4`.
///
/// ```
/// use deck_core::literal::{parse_fields, resolve};
///
/// let values = resolve(&parse_fields("1 2r 2m 1j 10 3i 50").unwrap()).unwrap();
/// assert_eq!(
///     values,
///     vec![Some(1.0), Some(1.0), Some(1.0), Some(2.0), None, Some(10.0),
///          Some(20.0), Some(30.0), Some(40.0), Some(50.0)]
/// );
/// ```
///
/// Counts above [`DEFAULT_MAX_EXPANSION`] are rejected; see
/// [`resolve_with_limit`].
pub fn resolve(tokens: &[HorizontalToken]) -> Result<Vec<Option<f64>>> {
    resolve_with_limit(tokens, DEFAULT_MAX_EXPANSION)
}

/// [`resolve`] with an explicit bound on how many entries one marker, or one
/// run of interpolation markers, may stand for.
///
/// A larger count fails with [`DeckError::UnresolvableShorthand`], so the
/// output stays linear in the number of fields.
pub fn resolve_with_limit(
    tokens: &[HorizontalToken],
    max_expansion: u32,
) -> Result<Vec<Option<f64>>> {
    let mut values: Vec<Option<f64>> = Vec::with_capacity(tokens.len());
    let mut pos = 0;

    while pos < tokens.len() {
        let token = &tokens[pos];
        match token {
            HorizontalToken::Number(number) => values.push(Some(number.to_f64())),
            HorizontalToken::Jump(_) => {
                let count = token.count().unwrap_or(1);
                let count = bounded(count.into(), max_expansion, token, pos)?;
                values.extend(std::iter::repeat(None).take(count));
            }
            HorizontalToken::Repeat(_) => {
                let previous = previous_value(&values, token, pos)?;
                let count = token.count().unwrap_or(1);
                let count = bounded(count.into(), max_expansion, token, pos)?;
                values.extend(std::iter::repeat(Some(previous)).take(count));
            }
            HorizontalToken::Multiply(factor) => {
                let previous = previous_value(&values, token, pos)?;
                values.push(Some(previous * factor.value() as f64));
            }
            HorizontalToken::Interpolate(_) | HorizontalToken::Log(..) => {
                let logarithmic = matches!(token, HorizontalToken::Log(..));
                let start = previous_value(&values, token, pos)?;

                // Fold a run of same-kind markers into one span
                let mut count = 0u64;
                let mut end = pos;
                while end < tokens.len() && same_kind(token, &tokens[end]) {
                    count += u64::from(tokens[end].count().unwrap_or(1));
                    end += 1;
                }
                let count = bounded(count, max_expansion, token, pos)? as u64;

                let stop = tokens
                    .get(end)
                    .and_then(HorizontalToken::value)
                    .ok_or_else(|| {
                        DeckError::unresolvable(
                            token.render(),
                            pos,
                            "interpolation must be followed by a number",
                        )
                    })?;

                if logarithmic && (start <= 0.0 || stop <= 0.0) {
                    return Err(DeckError::unresolvable(
                        token.render(),
                        pos,
                        format!(
                            "logarithmic interpolation needs positive endpoints, got {} and {}",
                            start, stop
                        ),
                    ));
                }

                let steps = (count + 1) as f64;
                for k in 1..=count {
                    let fraction = k as f64 / steps;
                    let value = if logarithmic {
                        (start.ln() + (stop.ln() - start.ln()) * fraction).exp()
                    } else {
                        start + (stop - start) * fraction
                    };
                    values.push(Some(value));
                }

                pos = end;
                continue;
            }
        }
        pos += 1;
    }

    Ok(values)
}

fn previous_value(values: &[Option<f64>], token: &HorizontalToken, pos: usize) -> Result<f64> {
    match values.last() {
        Some(Some(value)) => Ok(*value),
        Some(None) => Err(DeckError::unresolvable(
            token.render(),
            pos,
            "previous entry is a default, not a value",
        )),
        None => Err(DeckError::unresolvable(
            token.render(),
            pos,
            "no previous value",
        )),
    }
}

fn bounded(
    count: u64,
    max_expansion: u32,
    token: &HorizontalToken,
    pos: usize,
) -> Result<usize> {
    if count > u64::from(max_expansion) {
        return Err(DeckError::unresolvable(
            token.render(),
            pos,
            format!("count {} exceeds the expansion limit of {}", count, max_expansion),
        ));
    }
    Ok(count as usize)
}

fn same_kind(a: &HorizontalToken, b: &HorizontalToken) -> bool {
    matches!(
        (a, b),
        (HorizontalToken::Interpolate(_), HorizontalToken::Interpolate(_))
            | (HorizontalToken::Log(..), HorizontalToken::Log(..))
    )
}
