//! Weak type resolution (W1-W7) over one isolating run sequence.

use crate::unicode::BidiCharacterType::{self, *};

pub(crate) fn resolve_weak_types(types: &mut [BidiCharacterType], sos: BidiCharacterType) {
    // W1
    let mut previous = sos;
    for ty in types.iter_mut() {
        if *ty == NSM {
            *ty = if previous.is_isolate_control() { ON } else { previous };
        }
        previous = *ty;
    }

    // W2, W3
    let mut last_strong = sos;
    for ty in types.iter_mut() {
        match *ty {
            L | R => last_strong = *ty,
            AL => {
                last_strong = AL;
                *ty = R;
            }
            EN if last_strong == AL => *ty = AN,
            _ => {}
        }
    }

    // W4
    for i in 1..types.len().saturating_sub(1) {
        let (before, after) = (types[i - 1], types[i + 1]);
        match types[i] {
            ES | CS if before == EN && after == EN => types[i] = EN,
            CS if before == AN && after == AN => types[i] = AN,
            _ => {}
        }
    }

    // W5
    let mut i = 0;
    while i < types.len() {
        if types[i] != ET {
            i += 1;
            continue;
        }
        let start = i;
        while i < types.len() && types[i] == ET {
            i += 1;
        }
        let touches_number =
            (start > 0 && types[start - 1] == EN) || (i < types.len() && types[i] == EN);
        if touches_number {
            types[start..i].fill(EN);
        }
    }

    // W6
    for ty in types.iter_mut() {
        if matches!(*ty, ES | ET | CS) {
            *ty = ON;
        }
    }

    // W7
    let mut last_strong = sos;
    for ty in types.iter_mut() {
        match *ty {
            L | R => last_strong = *ty,
            EN if last_strong == L => *ty = L,
            _ => {}
        }
    }
}
