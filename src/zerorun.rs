//! Post-parse zero-run expansion: rewrites the densely-packed components the
//! state machine committed into their final 8-slot layout.

use crate::error::DiagKind;

///Expands `components[0..committed]`, which were written as if a `::` run at
///component index `zerorun` (if any) were elided, into the full 8-slot layout
///with the zero run re-inserted in place.
///
///`has_zerun` mirrors whether a `::` was observed at all; `committed` is the
///number of components written so far (`state.components` in the reference).
pub(crate) fn expand(
    components: &mut [u16; 8],
    has_zerorun: bool,
    zerorun: u8,
    committed: u8,
) -> Result<(), DiagKind> {
    if !has_zerorun {
        return if committed == 8 {
            Ok(())
        } else {
            Err(DiagKind::V6BadComponentCount)
        };
    }

    let zerorun = zerorun as usize;
    let committed = committed as usize;

    //Number of components to the right of the zero run that must slide down
    //to the end of the array.
    let move_count = committed.checked_sub(zerorun).ok_or(DiagKind::V6BadComponentCount)?;
    if move_count > 8 || zerorun > 8 {
        return Err(DiagKind::V6BadComponentCount);
    }
    let target = 8 - move_count;

    let mut expanded = [0u16; 8];
    expanded[..zerorun].copy_from_slice(&components[..zerorun]);
    expanded[target..target + move_count].copy_from_slice(&components[zerorun..committed]);
    //Everything in `zerorun..target` is left at zero, which is the abbreviated run.

    *components = expanded;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_zerorun_requires_full_count() {
        let mut components = [1, 2, 3, 4, 5, 6, 7, 8];
        assert!(expand(&mut components, false, 0, 8).is_ok());
        assert_eq!(components, [1, 2, 3, 4, 5, 6, 7, 8]);

        let mut short = [1, 2, 3, 4, 5, 6, 7, 0];
        assert_eq!(
            expand(&mut short, false, 0, 7),
            Err(DiagKind::V6BadComponentCount)
        );
    }

    #[test]
    fn leading_zerorun() {
        //"::1" -> zerorun at 0, one component committed (the trailing 1)
        let mut components = [1, 0, 0, 0, 0, 0, 0, 0];
        expand(&mut components, true, 0, 1).unwrap();
        assert_eq!(components, [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn middle_zerorun() {
        //"2001:db8::1:0:0:1" -> components [2001, db8, 1, 0, 0, 1] with zerorun at 2
        let mut components = [0x2001, 0x0db8, 1, 0, 0, 1, 0, 0];
        expand(&mut components, true, 2, 6).unwrap();
        assert_eq!(components, [0x2001, 0x0db8, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn trailing_zerorun() {
        //"fe80::" -> zerorun at 1, nothing after it
        let mut components = [0xfe80, 0, 0, 0, 0, 0, 0, 0];
        expand(&mut components, true, 1, 1).unwrap();
        assert_eq!(components, [0xfe80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn unreachable_move_count_is_rejected() {
        let mut components = [0u16; 8];
        assert_eq!(
            expand(&mut components, true, 5, 2),
            Err(DiagKind::V6BadComponentCount)
        );
    }
}
