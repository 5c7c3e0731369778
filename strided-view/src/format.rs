//! Human-readable rendering of strided arrays.

use log::trace;
use strided_traits::Scalar;

use crate::array::StridedArray;

/// Options controlling [`format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Digits after the decimal point for fractional values.
    pub precision: usize,
    /// Print values with magnitude below `10^-precision` as `0`.
    pub suppress_small: bool,
    /// Element count above which the output is summarised.
    pub threshold: usize,
    /// Elements kept at each end of a summarised 1-D array.
    pub edge_items: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: 6,
            suppress_small: false,
            threshold: 1000,
            edge_items: 3,
        }
    }
}

impl FormatOptions {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_suppress_small(mut self, suppress_small: bool) -> Self {
        self.suppress_small = suppress_small;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_edge_items(mut self, edge_items: usize) -> Self {
        self.edge_items = edge_items;
        self
    }
}

const LARGE_NOTE: &str = "\n(Large array - showing all elements)";

/// Render `array` as nested bracketed rows.
///
/// Elements of the last dimension are separated by a space. Rows of a 2-D
/// block break onto a new line indented by one space (two inside a 3-D or
/// deeper array). Blocks at the outermost level of a 3-D or deeper array are
/// separated by two blank lines, blocks at depth `d` by one blank line and
/// `d + 1` spaces of indent.
///
/// Arrays with more than `threshold` elements are summarised: a 1-D array
/// longer than `2 * edge_items` shows its first and last `edge_items`
/// elements around ` ... `; higher ranks render in full with a trailing note.
///
/// # Example
/// ```
/// use strided_view::{format, ElementKind, FormatOptions, Scalar, StridedArray};
///
/// let a = StridedArray::from_fn(&[2, 3], ElementKind::Int32, |idx| {
///     Scalar::from((idx[0] * 3 + idx[1] + 1) as i32)
/// })
/// .unwrap();
/// assert_eq!(format(&a, &FormatOptions::default()), "[[1 2 3]\n [4 5 6]]");
/// ```
pub fn format(array: &StridedArray<'_>, options: &FormatOptions) -> String {
    let size = array.size();
    if size == 0 {
        return if array.shape() == [0, 0] { "[][]" } else { "[]" }.to_string();
    }
    if size > options.threshold {
        trace!(
            "summarising {size} elements over threshold {}",
            options.threshold
        );
        if array.ndim() == 1 {
            return format_summary_1d(array, options);
        }
        let mut out = format_full(array, options);
        out.push_str(LARGE_NOTE);
        return out;
    }
    format_full(array, options)
}

fn format_summary_1d(array: &StridedArray<'_>, options: &FormatOptions) -> String {
    let n = array.shape()[0];
    let edge = options.edge_items;
    if n <= edge.saturating_mul(2) {
        return format_full(array, options);
    }
    let token = |i: usize| format_number(element(array, &[i]), options);
    let start: Vec<String> = (0..edge).map(token).collect();
    let end: Vec<String> = (n - edge..n).map(token).collect();
    format!("[{} ... {}]", start.join(" "), end.join(" "))
}

fn format_full(array: &StridedArray<'_>, options: &FormatOptions) -> String {
    let mut out = String::new();
    let mut idx = Vec::with_capacity(array.ndim());
    render(array, options, &mut idx, &mut out);
    out
}

/// Separator between the sub-blocks at `depth` of an `ndim`-dimensional array.
fn separator(depth: usize, ndim: usize) -> String {
    if depth + 1 == ndim {
        " ".to_string()
    } else if ndim == 2 {
        "\n ".to_string()
    } else if depth + 2 == ndim {
        "\n  ".to_string()
    } else if depth == 0 {
        "\n\n\n ".to_string()
    } else {
        format!("\n\n{}", " ".repeat(depth + 1))
    }
}

fn render(
    array: &StridedArray<'_>,
    options: &FormatOptions,
    idx: &mut Vec<usize>,
    out: &mut String,
) {
    let depth = idx.len();
    let ndim = array.ndim();
    let sep = separator(depth, ndim);
    out.push('[');
    for i in 0..array.shape()[depth] {
        if i > 0 {
            out.push_str(&sep);
        }
        idx.push(i);
        if depth + 1 == ndim {
            out.push_str(&format_number(element(array, idx), options));
        } else {
            render(array, options, idx, out);
        }
        idx.pop();
    }
    out.push(']');
}

/// Read an index the walk produced from the array's own shape.
pub(crate) fn element(array: &StridedArray<'_>, idx: &[usize]) -> Scalar {
    array
        .get(idx)
        .unwrap_or_else(|err| unreachable!("in-bounds index {idx:?} failed to read: {err}"))
}

/// Render a single element.
///
/// Integral values print without a decimal point, non-finite values as
/// `Infinity`, `-Infinity` or `NaN`. Fractional values are rounded to
/// `precision` digits, half away from zero, and trailing zeros after the
/// decimal point are stripped. A negative value that rounds to zero prints
/// as `0`, never `-0`.
pub fn format_number(value: Scalar, options: &FormatOptions) -> String {
    let x = match value {
        Scalar::Number(x) => x,
        Scalar::BigInt(v) => return v.to_string(),
        Scalar::BigUint(v) => return v.to_string(),
    };
    if options.suppress_small && x.abs() < 10f64.powi(-(options.precision as i32)) {
        return "0".to_string();
    }
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x.fract() == 0.0 {
        return format_integral(x);
    }
    let fixed = to_fixed(x, options.precision);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "" | "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Integral floats: plain digits below 1e21, exponent form (`1e+21`) above.
fn format_integral(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if x.abs() < 1e21 {
        return format!("{x}");
    }
    let exp = format!("{x:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Fixed-point rendering with `precision` fraction digits, rounding exact
/// ties away from zero.
fn to_fixed(x: f64, precision: usize) -> String {
    // 1100 fraction digits hold the exact expansion of any finite f64
    let exact = format!("{:.1100}", x.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(precision))
        .collect();
    let mut int_len = int_part.len();

    let round_up = frac_part
        .as_bytes()
        .get(precision)
        .is_some_and(|&d| d >= b'5');
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if x < 0.0 {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| d as char));
    if precision > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| d as char));
    }
    out
}
