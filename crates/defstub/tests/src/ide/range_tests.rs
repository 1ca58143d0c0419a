use super::*;

fn range(
    start: (u32, u32),
    end: (u32, u32),
) -> Range {
    Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
}

#[test]
fn normalize_converts_to_zero_based() {
    let selection = normalize_selection(RawPosition::new(2, 5), RawPosition::new(4, 1), SelectionMode::Char);
    assert_eq!(selection, range((1, 4), (3, 0)));
}

#[test]
fn normalize_swaps_reversed_marks() {
    let selection = normalize_selection(RawPosition::new(5, 3), RawPosition::new(2, 7), SelectionMode::Char);
    assert_eq!(selection, range((1, 6), (4, 2)));
}

#[test]
fn normalize_swaps_reversed_columns_on_one_line() {
    let selection = normalize_selection(RawPosition::new(3, 9), RawPosition::new(3, 2), SelectionMode::Char);
    assert_eq!(selection, range((2, 1), (2, 8)));
}

#[test]
fn normalize_line_mode_spans_whole_lines() {
    let selection = normalize_selection(RawPosition::new(7, 12), RawPosition::new(3, 4), SelectionMode::Line);
    assert_eq!(selection.start, Position::new(2, 0));
    assert_eq!(selection.end, Position::new(6, MAX_COLUMN));
    assert!(!selection.block);
}

#[test]
fn normalize_block_mode_sets_block_flag() {
    let selection = normalize_selection(RawPosition::new(1, 3), RawPosition::new(4, 8), SelectionMode::Block);
    assert!(selection.block);
    assert_eq!(selection.start, Position::new(0, 2));
    assert_eq!(selection.end, Position::new(3, 7));
}

#[test]
fn normalize_clamps_zero_marks() {
    let selection = normalize_selection(RawPosition::new(0, 0), RawPosition::new(1, 1), SelectionMode::Char);
    assert_eq!(selection, range((0, 0), (0, 0)));
}

#[test]
fn intersects_is_reflexive() {
    for r in [range((0, 0), (0, 0)), range((1, 2), (3, 4)), range((5, 0), (5, MAX_COLUMN))] {
        assert!(intersects(&r, &r), "{r:?} should intersect itself");
    }
}

#[test]
fn intersects_is_symmetric() {
    let ranges = [
        range((0, 0), (0, 5)),
        range((0, 5), (1, 0)),
        range((1, 1), (2, 0)),
        range((3, 0), (4, 0)),
        range((0, 0), (10, 0)),
    ];
    for a in &ranges {
        for b in &ranges {
            assert_eq!(intersects(a, b), intersects(b, a), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn touching_boundaries_intersect() {
    assert!(intersects(&range((0, 0), (0, 5)), &range((0, 5), (1, 0))));
}

#[test]
fn disjoint_ranges_do_not_intersect() {
    assert!(!intersects(&range((0, 0), (0, 4)), &range((0, 5), (1, 0))));
    assert!(!intersects(&range((3, 0), (4, 0)), &range((1, 0), (2, 9))));
}

#[test]
fn containment_intersects() {
    assert!(range((0, 0), (10, 0)).intersects(&range((2, 3), (2, 9))));
}

#[test]
fn block_ranges_compare_as_linear_ranges() {
    // Columns outside the rectangle still count: block selections are not
    // special-cased.
    let block = Range::block(Position::new(0, 10), Position::new(2, 12));
    assert!(intersects(&block, &range((1, 0), (1, 3))));
}

#[test]
fn raw_position_parses_line_and_column() {
    assert_eq!("12:4".parse::<RawPosition>(), Ok(RawPosition::new(12, 4)));
    assert!("12".parse::<RawPosition>().is_err());
    assert!("a:4".parse::<RawPosition>().is_err());
}

#[test]
fn selection_mode_accepts_names_and_vim_letters() {
    assert_eq!("char".parse::<SelectionMode>(), Ok(SelectionMode::Char));
    assert_eq!("LINE".parse::<SelectionMode>(), Ok(SelectionMode::Line));
    assert_eq!("block".parse::<SelectionMode>(), Ok(SelectionMode::Block));
    assert_eq!("v".parse::<SelectionMode>(), Ok(SelectionMode::Char));
    assert_eq!("V".parse::<SelectionMode>(), Ok(SelectionMode::Line));
    assert_eq!("\u{16}".parse::<SelectionMode>(), Ok(SelectionMode::Block));
    assert!("column".parse::<SelectionMode>().is_err());
}
