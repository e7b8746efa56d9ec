/// Midpoint in years of an age bucket label.
///
/// Understands "Under N years", "A to B years" and "N years and over"; the
/// open-ended bucket is assumed to be five years wide. Anything else yields
/// `None`.
pub fn midpoint(label: &str) -> Option<f64> {
    let numbers = integers(label);
    if label.starts_with("Under") {
        numbers.first().map(|n| n / 2.0)
    } else if label.contains("to") {
        match numbers.as_slice() {
            [start, end, ..] => Some((start + end) / 2.0),
            _ => None,
        }
    } else if label.contains("and over") {
        numbers.first().map(|n| n + 2.5)
    } else {
        None
    }
}

/// Label whose midpoint is nearest to `median_age`.
///
/// Earlier labels win ties. Labels without a midpoint are never chosen.
pub fn closest<'a, S: AsRef<str>>(median_age: f64, labels: &'a [S]) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for label in labels {
        let label = label.as_ref();
        let Some(mid) = midpoint(label) else {
            continue;
        };
        let distance = (mid - median_age).abs();
        let better = match best {
            Some((_, best_distance)) => distance < best_distance,
            None => true,
        };
        if better {
            best = Some((label, distance));
        }
    }
    best.map(|(label, _)| label)
}

fn integers(label: &str) -> Vec<f64> {
    label
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse::<u32>().ok())
        .map(f64::from)
        .collect()
}
