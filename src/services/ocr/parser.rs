use regex::Regex;

use crate::models::nutrition::NutritionItem;
use crate::models::text_block::TextBlock;

/// Nutrient match candidate: extracted name/amount plus the byte offset just
/// past the match, kept only for percentage association.
#[derive(Debug, Clone, PartialEq)]
struct NutrientCandidate {
    name: String,
    amount: String,
    source_offset: usize,
}

/// Percentage match candidate: digit run plus the byte offset where the
/// match begins.
#[derive(Debug, Clone, PartialEq)]
struct PercentCandidate {
    value: String,
    source_offset: usize,
}

/// Parse nutrition facts rows out of recognized text blocks.
///
/// Each block is handled independently: newlines are collapsed to spaces,
/// a leading calorie entry is extracted when the block mentions `kcal`, then
/// nutrient name/amount pairs and percentage tokens are scanned left to
/// right and paired by position. A percentage attaches to a nutrient when it
/// is the first one appearing strictly after that nutrient's match; with no
/// intervening percentage, one token can serve several preceding nutrients.
///
/// Total over its input: blocks without recognizable content contribute
/// nothing, they never fail.
pub fn parse_nutrition(blocks: &[TextBlock]) -> Vec<NutritionItem> {
    // Nutrient: Hangul/Latin letter run, then a number, then an optional unit
    let nutrient_re = Regex::new(r"([가-힣a-zA-Z]+)\s*(\d+\.?\d*)\s*(kcal|g|mg)?").unwrap();
    let percent_re = Regex::new(r"(\d+)\s*%").unwrap();
    let kcal_re = Regex::new(r"(\d+\.?\d*)\s*kcal").unwrap();

    let mut items = Vec::new();

    for block in blocks {
        parse_block(&block.text, &kcal_re, &nutrient_re, &percent_re, &mut items);
    }

    // Drop noise rows: a name needs at least one letter, an amount at least
    // one digit
    items.retain(is_valid_item);
    items
}

/// Scan one block and append its rows in match order.
fn parse_block(
    raw: &str,
    kcal_re: &Regex,
    nutrient_re: &Regex,
    percent_re: &Regex,
    items: &mut Vec<NutritionItem>,
) {
    let text = normalize(raw);

    // Calorie entries first: the general scan may re-match the same span as
    // nutrient noise, which the validity filter handles
    if text.contains("kcal") {
        if let Some(caps) = kcal_re.captures(&text) {
            items.push(NutritionItem::new(
                "Calories",
                format!("{} kcal", &caps[1]),
            ));
        }
    }

    let nutrients: Vec<NutrientCandidate> = nutrient_re
        .captures_iter(&text)
        .map(|caps| {
            let full = caps.get(0).unwrap();
            let amount = match caps.get(3) {
                Some(unit) => format!("{} {}", &caps[2], unit.as_str()),
                None => caps[2].to_string(),
            };

            NutrientCandidate {
                name: caps[1].trim().to_string(),
                amount: amount.trim().to_string(),
                source_offset: full.end(),
            }
        })
        .collect();

    let percentages: Vec<PercentCandidate> = percent_re
        .captures_iter(&text)
        .map(|caps| PercentCandidate {
            value: caps[1].to_string(),
            source_offset: caps.get(0).unwrap().start(),
        })
        .collect();

    // Nearest-following pairing: first percentage starting strictly after
    // the nutrient match end, scanning percentages in occurrence order
    for nutrient in nutrients {
        let percentage = percentages
            .iter()
            .find(|p| p.source_offset > nutrient.source_offset)
            .map(|p| format!("{}%", p.value));

        items.push(NutritionItem {
            name: nutrient.name,
            amount: nutrient.amount,
            percentage,
        });
    }
}

/// Collapse embedded line breaks to spaces and trim the ends.
/// All pattern matching runs on this one normalized line per block.
fn normalize(raw: &str) -> String {
    raw.replace('\n', " ").trim().to_string()
}

fn is_valid_item(item: &NutritionItem) -> bool {
    let name_valid = item
        .name
        .chars()
        .any(|c| c.is_ascii_alphabetic() || ('가'..='힣').contains(&c));
    let amount_valid = item.amount.chars().any(|c| c.is_ascii_digit());

    name_valid && amount_valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(texts: &[&str]) -> Vec<TextBlock> {
        texts.iter().map(|t| TextBlock::new(*t)).collect()
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse_nutrition(&[]).is_empty());
        assert!(parse_nutrition(&blocks(&[""])).is_empty());
    }

    #[test]
    fn test_calorie_extraction_comes_first() {
        let items = parse_nutrition(&blocks(&["총 250.5 kcal 탄수화물 30g"]));

        assert_eq!(
            items[0],
            NutritionItem::new("Calories", "250.5 kcal"),
            "calorie entry should lead the block's rows"
        );
        // The calorie span is also re-matched by the general scan; that
        // redundancy is accepted, not filtered
        assert!(items.contains(&NutritionItem::new("탄수화물", "30 g")));
    }

    #[test]
    fn test_nutrient_percentage_pairing() {
        let items = parse_nutrition(&blocks(&["단백질 10g 15% 지방 5g 8%"]));

        assert_eq!(
            items,
            vec![
                NutritionItem::with_percentage("단백질", "10 g", "15%"),
                NutritionItem::with_percentage("지방", "5 g", "8%"),
            ]
        );
    }

    #[test]
    fn test_shared_percentage_attaches_to_both_nutrients() {
        // One trailing percentage with nothing in between serves every
        // preceding nutrient; documented association rule, not a defect fix
        let items = parse_nutrition(&blocks(&["나트륨 200mg 칼슘 50mg 10%"]));

        assert_eq!(
            items,
            vec![
                NutritionItem::with_percentage("나트륨", "200 mg", "10%"),
                NutritionItem::with_percentage("칼슘", "50 mg", "10%"),
            ]
        );
    }

    #[test]
    fn test_percentage_overlapping_amount_does_not_attach() {
        // The percent token starts inside the nutrient match span, so its
        // offset is not strictly greater than the match end
        let items = parse_nutrition(&blocks(&["단백질 10%"]));

        assert_eq!(items, vec![NutritionItem::new("단백질", "10")]);
    }

    #[test]
    fn test_amount_without_unit_keeps_bare_number() {
        let items = parse_nutrition(&blocks(&["단백질 12"]));
        assert_eq!(items, vec![NutritionItem::new("단백질", "12")]);
    }

    #[test]
    fn test_noise_blocks_yield_nothing() {
        assert!(parse_nutrition(&blocks(&["###@@@"])).is_empty());
        assert!(parse_nutrition(&blocks(&["123 456"])).is_empty());
    }

    #[test]
    fn test_newlines_collapse_to_spaces() {
        let items = parse_nutrition(&blocks(&["단백질\n10g\n15%"]));

        assert_eq!(
            items,
            vec![NutritionItem::with_percentage("단백질", "10 g", "15%")]
        );
    }

    #[test]
    fn test_percentages_never_cross_blocks() {
        // The unmatched nutrient at the end of block A must not reach into
        // block B for its percentage
        let items = parse_nutrition(&blocks(&["나트륨 200mg", "지방 5g 8%"]));

        assert_eq!(
            items,
            vec![
                NutritionItem::new("나트륨", "200 mg"),
                NutritionItem::with_percentage("지방", "5 g", "8%"),
            ]
        );
    }

    #[test]
    fn test_blocks_concatenate_in_supplied_order() {
        let items = parse_nutrition(&blocks(&["지방 5g", "단백질 10g"]));

        assert_eq!(items[0].name, "지방");
        assert_eq!(items[1].name, "단백질");
    }

    #[test]
    fn test_latin_names_parse_too() {
        let items = parse_nutrition(&blocks(&["Protein 10g 15%"]));

        assert_eq!(
            items,
            vec![NutritionItem::with_percentage("Protein", "10 g", "15%")]
        );
    }

    #[test]
    fn test_kcal_only_block() {
        let items = parse_nutrition(&blocks(&["250 kcal"]));

        // The general scan finds no letters-then-digits span here, so only
        // the calorie special case fires
        assert_eq!(items, vec![NutritionItem::new("Calories", "250 kcal")]);
    }

    #[test]
    fn test_calorie_special_case_uses_first_match() {
        let items = parse_nutrition(&blocks(&["120 kcal 250 kcal"]));

        assert_eq!(items[0], NutritionItem::new("Calories", "120 kcal"));
        // The second kcal span still re-matches in the general scan, with
        // the preceding "kcal" letter run as its name
        assert_eq!(items[1], NutritionItem::new("kcal", "250 kcal"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = blocks(&["총 250.5 kcal 탄수화물 30g", "단백질 10g 15% 지방 5g 8%"]);

        let first = parse_nutrition(&input);
        let second = parse_nutrition(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_item_passes_validity_filter() {
        let inputs = blocks(&[
            "총 250.5 kcal 탄수화물 30g",
            "단백질 10g 15% 지방 5g 8%",
            "나트륨 200mg 칼슘 50mg 10%",
            "###@@@",
            "123 456",
        ]);

        for item in parse_nutrition(&inputs) {
            assert!(is_valid_item(&item), "invalid item emitted: {:?}", item);
        }
    }

    #[test]
    fn test_validity_filter_rejects_blank_fields() {
        assert!(!is_valid_item(&NutritionItem::new("123", "10 g")));
        assert!(!is_valid_item(&NutritionItem::new("단백질", "g")));
        assert!(is_valid_item(&NutritionItem::new("단백질", "10 g")));
        assert!(is_valid_item(&NutritionItem::new("Calories", "250.5 kcal")));
    }
}
