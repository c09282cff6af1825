use std::collections::BTreeSet;

pub(crate) const MAJOR_CITY_SCORE: u8 = 90;
pub(crate) const OTHER_LOCATION_SCORE: u8 = 50;
const POINTS_PER_YEAR_GAP: u32 = 20;

/// Trimmed, lowercased skill names with blanks dropped.
pub fn normalize_skills<'a, I>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    skills
        .into_iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Jaccard overlap of the two skill sets as a 0-100 percentage.
pub fn skills_match(candidate: &BTreeSet<String>, vacancy: &BTreeSet<String>) -> u8 {
    let candidate = normalize_skills(candidate);
    let vacancy = normalize_skills(vacancy);

    let union = candidate.union(&vacancy).count() as u64;
    if union == 0 {
        return 0;
    }
    let shared = candidate.intersection(&vacancy).count() as u64;

    rounded_percentage(shared, union)
}

/// Every year of gap between actual and required experience costs 20 points.
pub fn experience_match(candidate_years: u32, required_years: u32) -> u8 {
    let gap = candidate_years.abs_diff(required_years);
    100u32.saturating_sub(gap.saturating_mul(POINTS_PER_YEAR_GAP)) as u8
}

/// Coarse placeholder: candidates based in a major city score 90, everyone else 50.
pub fn location_match(location: &str, major_cities: &[String]) -> u8 {
    let location = location.to_lowercase();
    let in_major_city = major_cities
        .iter()
        .map(|city| city.trim().to_lowercase())
        .any(|city| !city.is_empty() && location.contains(&city));

    if in_major_city {
        MAJOR_CITY_SCORE
    } else {
        OTHER_LOCATION_SCORE
    }
}

/// Relative distance between desired and offered salary, inverted into a 0-100 score.
pub fn salary_match(candidate_salary: u64, vacancy_salary: u64) -> u8 {
    if vacancy_salary == 0 {
        return 0;
    }

    let diff = candidate_salary.abs_diff(vacancy_salary) as f64 / vacancy_salary as f64;
    (100.0 - diff * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Reads a point salary out of free text.
///
/// `"$110K - $140K"` is the midpoint of the range (125000), `"$95,000"` is 95000, and text
/// without digits is 0. `K` and `M` suffixes scale the figure they follow.
pub fn parse_salary(text: &str) -> u64 {
    let figures = salary_figures(text);
    match figures.as_slice() {
        [] => 0,
        [single] => *single,
        [low, high, ..] => low / 2 + high / 2 + (low % 2 + high % 2) / 2,
    }
}

fn salary_figures(text: &str) -> Vec<u64> {
    let chars: Vec<char> = text.chars().collect();
    let mut figures = Vec::new();
    let mut index = 0;

    while index < chars.len() {
        if !chars[index].is_ascii_digit() {
            index += 1;
            continue;
        }

        let mut digits = String::new();
        while let Some(&ch) = chars.get(index) {
            if ch.is_ascii_digit() {
                digits.push(ch);
                index += 1;
            } else if ch == ',' && chars.get(index + 1).is_some_and(char::is_ascii_digit) {
                index += 1;
            } else {
                break;
            }
        }

        let mut fraction = String::new();
        if chars.get(index) == Some(&'.') && chars.get(index + 1).is_some_and(char::is_ascii_digit)
        {
            index += 1;
            while let Some(&ch) = chars.get(index).filter(|ch| ch.is_ascii_digit()) {
                fraction.push(ch);
                index += 1;
            }
        }

        let mut lookahead = index;
        while chars.get(lookahead) == Some(&' ') {
            lookahead += 1;
        }
        let standalone_suffix = !chars
            .get(lookahead + 1)
            .is_some_and(|next| next.is_alphabetic());
        let multiplier = match chars.get(lookahead) {
            Some('k' | 'K') if standalone_suffix => 1_000.0,
            Some('m' | 'M') if standalone_suffix => 1_000_000.0,
            _ => 1.0,
        };
        if multiplier > 1.0 {
            index = lookahead + 1;
        }

        let fraction = if fraction.is_empty() { "0" } else { &fraction };
        let value: f64 = format!("{digits}.{fraction}").parse().unwrap_or(0.0);
        figures.push((value * multiplier).round() as u64);
    }

    figures
}

fn rounded_percentage(part: u64, whole: u64) -> u8 {
    ((part * 200 + whole) / (whole * 2)).min(100) as u8
}
