//! Neutral resolution (N1-N2) and implicit levels (I1-I2).

use crate::unicode::BidiCharacterType::{self, *};

/// Direction a resolved non-neutral type contributes to N1.
const fn neutral_context(ty: BidiCharacterType) -> BidiCharacterType {
    match ty {
        L => L,
        _ => R,
    }
}

/// Resolve every run of neutral and isolate types in one sequence.
pub(crate) fn resolve_neutral_types(
    types: &mut [BidiCharacterType],
    sos: BidiCharacterType,
    eos: BidiCharacterType,
    level: u8,
) {
    let embedding = if level % 2 == 0 { L } else { R };
    let mut i = 0;
    while i < types.len() {
        if !types[i].is_neutral_or_isolate() {
            i += 1;
            continue;
        }
        let start = i;
        while i < types.len() && types[i].is_neutral_or_isolate() {
            i += 1;
        }
        let leading = if start == 0 {
            sos
        } else {
            neutral_context(types[start - 1])
        };
        let trailing = if i == types.len() {
            eos
        } else {
            neutral_context(types[i])
        };
        // N1, then N2.
        let resolved = if leading == trailing { leading } else { embedding };
        types[start..i].fill(resolved);
    }
}

/// Implicit level of a character with resolved type `ty` at `level`.
pub(crate) const fn implicit_level(level: u8, ty: BidiCharacterType) -> u8 {
    if level % 2 == 0 {
        match ty {
            R => level + 1,
            AN | EN => level + 2,
            _ => level,
        }
    } else {
        match ty {
            L | EN | AN => level + 1,
            _ => level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutrals(
        types: &[BidiCharacterType],
        sos: BidiCharacterType,
        eos: BidiCharacterType,
        level: u8,
    ) -> Vec<BidiCharacterType> {
        let mut types = types.to_vec();
        resolve_neutral_types(&mut types, sos, eos, level);
        types
    }

    #[test]
    fn test_n1_surrounded_by_same_direction() {
        assert_eq!(neutrals(&[R, WS, R], L, L, 0), vec![R, R, R]);
        assert_eq!(neutrals(&[L, ON, L], R, R, 1), vec![L, L, L]);
        // Numbers act as R.
        assert_eq!(neutrals(&[R, ON, AN], L, L, 0), vec![R, R, AN]);
        assert_eq!(neutrals(&[EN, WS, R], L, L, 0), vec![EN, R, R]);
    }

    #[test]
    fn test_n2_mixed_context_takes_embedding() {
        assert_eq!(neutrals(&[L, WS, R], L, L, 0), vec![L, L, R]);
        assert_eq!(neutrals(&[L, WS, R], L, L, 1), vec![L, R, R]);
    }

    #[test]
    fn test_sos_and_eos() {
        assert_eq!(neutrals(&[ON, R], R, L, 0), vec![R, R]);
        assert_eq!(neutrals(&[R, ON], L, L, 0), vec![R, L]);
        assert_eq!(neutrals(&[WS, PDI, S], R, R, 0), vec![R, R, R]);
    }

    #[test]
    fn test_implicit_levels() {
        assert_eq!(implicit_level(0, L), 0);
        assert_eq!(implicit_level(0, R), 1);
        assert_eq!(implicit_level(0, AN), 2);
        assert_eq!(implicit_level(0, EN), 2);
        assert_eq!(implicit_level(1, R), 1);
        assert_eq!(implicit_level(1, L), 2);
        assert_eq!(implicit_level(1, EN), 2);
        assert_eq!(implicit_level(1, AN), 2);
    }
}
