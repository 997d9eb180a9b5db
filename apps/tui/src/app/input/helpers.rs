use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// One grid row up, staying put on the first row.
pub const fn grid_up(index: usize, columns: usize) -> usize {
    if columns == 0 || index < columns {
        index
    } else {
        index - columns
    }
}

/// One grid row down, staying put when there is no card below.
pub const fn grid_down(index: usize, columns: usize, len: usize) -> usize {
    if index + columns < len {
        index + columns
    } else {
        index
    }
}

/// Best fuzzy match for `input` among `candidates`.
pub fn complete<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    candidates
        .into_iter()
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(candidate, input)
                .map(|score| (score, candidate))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, candidate)| candidate)
}
