//! UTF-16 scalar decoding with replacement-character recovery.

use super::codepoint::CodePoint;

const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

const fn combine_surrogates(high: u16, low: u16) -> CodePoint {
    let value = 0x1_0000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);
    CodePoint::new_unchecked(value)
}

/// Decode the code point starting at `index`.
///
/// Returns the code point and the number of units consumed:
/// - a surrogate pair yields the supplementary code point and 2;
/// - an unpaired surrogate yields U+FFFD and 1;
/// - an out-of-bounds `index` yields U+FFFD and 0.
#[must_use]
pub fn decode_at(buffer: &[u16], index: usize) -> (CodePoint, usize) {
    let Some(&unit) = buffer.get(index) else {
        return (CodePoint::REPLACEMENT_CHAR, 0);
    };

    if is_high_surrogate(unit) {
        if let Some(&low) = buffer.get(index + 1) {
            if is_low_surrogate(low) {
                return (combine_surrogates(unit, low), 2);
            }
        }
        return (CodePoint::REPLACEMENT_CHAR, 1);
    }
    if is_low_surrogate(unit) {
        return (CodePoint::REPLACEMENT_CHAR, 1);
    }
    (CodePoint::new_unchecked(u32::from(unit)), 1)
}

/// Decode the code point ending at `index`, for backward iteration.
///
/// Mirrors [`decode_at`]: a low surrogate preceded by a high surrogate yields
/// the pair and 2 (the caller steps back by the consumed count).
#[must_use]
pub fn decode_last_at(buffer: &[u16], index: usize) -> (CodePoint, usize) {
    let Some(&unit) = buffer.get(index) else {
        return (CodePoint::REPLACEMENT_CHAR, 0);
    };

    if is_low_surrogate(unit) {
        if let Some(&high) = index.checked_sub(1).and_then(|prev| buffer.get(prev)) {
            if is_high_surrogate(high) {
                return (combine_surrogates(high, unit), 2);
            }
        }
        return (CodePoint::REPLACEMENT_CHAR, 1);
    }
    if is_high_surrogate(unit) {
        return (CodePoint::REPLACEMENT_CHAR, 1);
    }
    (CodePoint::new_unchecked(u32::from(unit)), 1)
}

/// Iterator over the code points of a UTF-16 buffer.
#[derive(Clone, Debug)]
pub struct Utf16CodePoints<'a> {
    buffer: &'a [u16],
    front: usize,
    back: usize,
}

impl<'a> Utf16CodePoints<'a> {
    #[must_use]
    pub fn new(buffer: &'a [u16]) -> Self {
        Self {
            buffer,
            front: 0,
            back: buffer.len(),
        }
    }

    /// Code unit offset of the next code point from the front.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.front
    }
}

impl Iterator for Utf16CodePoints<'_> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let (cp, consumed) = decode_at(&self.buffer[..self.back], self.front);
        self.front += consumed;
        Some(cp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let units = self.back - self.front;
        (units.div_ceil(2), Some(units))
    }
}

impl DoubleEndedIterator for Utf16CodePoints<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let (cp, consumed) = decode_last_at(&self.buffer[self.front..], self.back - self.front - 1);
        self.back -= consumed;
        Some(cp)
    }
}

/// Number of code points in a UTF-16 buffer, counting each unpaired
/// surrogate as one.
#[must_use]
pub fn code_point_count(buffer: &[u16]) -> usize {
    Utf16CodePoints::new(buffer).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_decode_bmp() {
        let buf = utf16("aé中");
        assert_eq!(decode_at(&buf, 0), (CodePoint::from('a'), 1));
        assert_eq!(decode_at(&buf, 2), (CodePoint::from('中'), 1));
    }

    #[test]
    fn test_decode_surrogate_pair() {
        let buf = utf16("x😀");
        assert_eq!(decode_at(&buf, 1), (CodePoint::from('😀'), 2));
        assert_eq!(decode_last_at(&buf, 2), (CodePoint::from('😀'), 2));
    }

    #[test]
    fn test_out_of_bounds() {
        let buf = utf16("ab");
        assert_eq!(decode_at(&buf, 2), (CodePoint::REPLACEMENT_CHAR, 0));
        assert_eq!(decode_last_at(&buf, 5), (CodePoint::REPLACEMENT_CHAR, 0));
        assert_eq!(decode_at(&[], 0), (CodePoint::REPLACEMENT_CHAR, 0));
    }

    #[test]
    fn test_unpaired_high_surrogate() {
        let buf = [0xD83D, 0x0041];
        assert_eq!(decode_at(&buf, 0), (CodePoint::REPLACEMENT_CHAR, 1));
        assert_eq!(decode_at(&buf, 1), (CodePoint::from('A'), 1));
        // Truncated at the end of the buffer.
        assert_eq!(decode_at(&[0xD83D], 0), (CodePoint::REPLACEMENT_CHAR, 1));
    }

    #[test]
    fn test_lone_low_surrogate() {
        let buf = [0x0041, 0xDE00];
        assert_eq!(decode_at(&buf, 1), (CodePoint::REPLACEMENT_CHAR, 1));
        assert_eq!(decode_last_at(&buf, 1), (CodePoint::REPLACEMENT_CHAR, 1));
        assert_eq!(decode_last_at(&[0xDE00], 0), (CodePoint::REPLACEMENT_CHAR, 1));
    }

    #[test]
    fn test_reversed_pair_is_two_replacements() {
        let buf = [0xDE00, 0xD83D];
        let decoded: Vec<_> = Utf16CodePoints::new(&buf).collect();
        assert_eq!(decoded, vec![CodePoint::REPLACEMENT_CHAR; 2]);
    }

    #[test]
    fn test_iterator_forward_and_backward_agree() {
        let buf = utf16("a😀b\u{10FFFF}c");
        let forward: Vec<_> = Utf16CodePoints::new(&buf).collect();
        let mut backward: Vec<_> = Utf16CodePoints::new(&buf).rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 5);
        assert_eq!(code_point_count(&buf), 5);
    }

    #[test]
    fn test_iterator_offset_tracks_units() {
        let buf = utf16("😀a");
        let mut iter = Utf16CodePoints::new(&buf);
        iter.next();
        assert_eq!(iter.offset(), 2);
    }
}
