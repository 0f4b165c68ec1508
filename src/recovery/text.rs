use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Recipe, RecipeRequest};
use crate::recovery::normalize::baseline;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Title:?\s*([^\n]+)").expect("title pattern"));
static RECIPE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Recipe:?\s*([^\n]+)").expect("recipe pattern"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Description:?\s*([^\n]+(?:\n[^\n]+)*)").expect("description pattern")
});
static PREP_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Prep\s*Time:?\s*([^\n]+)").expect("prep time pattern"));
static COOK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Cook\s*Time:?\s*([^\n]+)").expect("cook time pattern"));
static SERVINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Servings:?\s*(\d+)").expect("servings pattern"));

// Section blocks run until the next recognized label or end of text. Rust's
// regex has no lookahead, so the terminating label is consumed by a
// non-capturing group instead; only group 1 is used.
static INGREDIENTS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Ingredients:?\s*(.*?)(?:Instructions:|Directions:|Steps:|$)")
        .expect("ingredients section pattern")
});
static INSTRUCTIONS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:Instructions|Directions|Steps):?\s*(.*?)(?:Tips:|Notes:|Nutrition:|$)")
        .expect("instructions section pattern")
});
static TIPS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:Tips|Notes|Chef's Tips):?\s*(.*?)(?:Nutrition:|$)")
        .expect("tips section pattern")
});
static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Tags:?\s*([^\n]+)").expect("tags pattern"));
static NUTRITION_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Nutrition(?:\s*Facts)?:?\s*(.*)$").expect("nutrition section pattern")
});
static CALORIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Calories:?\s*([^\n,;]+)").expect("calories pattern"));
static PROTEIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Protein:?\s*([^\n,;]+)").expect("protein pattern"));
static CARBS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Carbs:?\s*([^\n,;]+)").expect("carbs pattern"));
static FAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Fat:?\s*([^\n,;]+)").expect("fat pattern"));

// Line cleanup
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[•\-*]\s*").expect("bullet pattern"));
static NUMBERED_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[•\-*\d]+\.?\s*").expect("numbered bullet pattern"));
static INGREDIENTS_LABEL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ingredients:?$").expect("ingredients label line"));
static INSTRUCTIONS_LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:instructions|directions|steps):?$").expect("instructions label line")
});
static TIPS_LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:tips|notes|chef's tips):?$").expect("tips label line")
});

/// Best-effort extraction of labeled sections from raw model text.
///
/// Used when JSON recovery fails. Every field is probed independently and
/// tolerates absence; the result starts from the request-derived baseline,
/// so this never fails and never produces an empty list.
pub fn extract(raw: &str, request: &RecipeRequest) -> Recipe {
    extract_report(raw, request).0
}

/// Like [`extract`], but also reports whether any labeled content was
/// actually found. A `false` flag means the result is pure baseline and the
/// orchestrator should treat recovery as exhausted.
pub(crate) fn extract_report(raw: &str, request: &RecipeRequest) -> (Recipe, bool) {
    let mut recipe = baseline(request);
    let mut matched = false;

    if let Some(title) = capture(&TITLE, raw).or_else(|| capture(&RECIPE_LABEL, raw)) {
        recipe.title = title;
        matched = true;
    }

    if let Some(description) = capture(&DESCRIPTION, raw) {
        recipe.description = description;
        matched = true;
    }

    if let Some(prep) = capture(&PREP_TIME, raw) {
        recipe.prep_time = prep;
        matched = true;
    }

    if let Some(cook) = capture(&COOK_TIME, raw) {
        recipe.cook_time = cook;
        matched = true;
    }

    if let Some(servings) = capture(&SERVINGS, raw).and_then(|s| s.parse::<u32>().ok()) {
        if servings >= 1 {
            recipe.servings = servings;
            matched = true;
        }
    }

    if let Some(block) = capture_raw(&INGREDIENTS_SECTION, raw) {
        let lines = section_lines(&block, &INGREDIENTS_LABEL_LINE, &BULLET);
        if !lines.is_empty() {
            recipe.ingredients = lines;
            matched = true;
        }
    }

    if let Some(block) = capture_raw(&INSTRUCTIONS_SECTION, raw) {
        let lines = section_lines(&block, &INSTRUCTIONS_LABEL_LINE, &NUMBERED_BULLET);
        if !lines.is_empty() {
            recipe.instructions = lines;
            matched = true;
        }
    }

    if let Some(block) = capture_raw(&TIPS_SECTION, raw) {
        let lines = section_lines(&block, &TIPS_LABEL_LINE, &NUMBERED_BULLET);
        if !lines.is_empty() {
            recipe.tips = lines;
            matched = true;
        }
    }

    if let Some(tag_line) = capture(&TAGS, raw) {
        let tags: Vec<String> = tag_line
            .split([',', ';'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if !tags.is_empty() {
            recipe.tags = tags;
            matched = true;
        }
    }

    if let Some(block) = capture_raw(&NUTRITION_SECTION, raw) {
        if let Some(calories) = capture(&CALORIES, &block) {
            recipe.nutrition_facts.calories = calories;
            matched = true;
        }
        if let Some(protein) = capture(&PROTEIN, &block) {
            recipe.nutrition_facts.protein = protein;
            matched = true;
        }
        if let Some(carbs) = capture(&CARBS, &block) {
            recipe.nutrition_facts.carbs = carbs;
            matched = true;
        }
        if let Some(fat) = capture(&FAT, &block) {
            recipe.nutrition_facts.fat = fat;
            matched = true;
        }
    }

    (recipe, matched)
}

/// First capture group, trimmed, None when empty.
fn capture(pattern: &Regex, text: &str) -> Option<String> {
    capture_raw(pattern, text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn capture_raw(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split a section block into cleaned lines: trimmed, label lines and
/// blanks discarded, leading bullet/number markers stripped.
fn section_lines(block: &str, label_line: &Regex, marker: &Regex) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !label_line.is_match(line))
        .map(|line| marker.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
