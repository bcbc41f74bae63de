use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unclosed {{ placeholder")]
    UnclosedPlaceholder,
    #[error("unclosed [ alternative group")]
    UnclosedGroup,
    #[error("nested [ inside alternative group")]
    NestedGroup,
    #[error("empty alternative in group [{0}]")]
    EmptyAlternative(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    RestaurantName,
    DishName,
    Price,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "restaurantName" => Some(Placeholder::RestaurantName),
            "dishName" => Some(Placeholder::DishName),
            "price" => Some(Placeholder::Price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
    // One phrase chosen uniformly at random per render; each group is an
    // independent draw even when two groups list the same phrases.
    Alternatives(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy)]
pub struct PlaceholderValues<'a> {
    pub restaurant_name: &'a str,
    pub dish_name: &'a str,
    pub price: &'a str,
}

impl Template {
    // Parsed once at bank construction; rendering never re-scans the raw text.
    pub fn parse(raw: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => return Err(TemplateError::UnclosedPlaceholder),
                        }
                    }
                    let placeholder = Placeholder::from_name(&name)
                        .ok_or_else(|| TemplateError::UnknownPlaceholder(name.clone()))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                '[' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some('[') => return Err(TemplateError::NestedGroup),
                            Some(c) => body.push(c),
                            None => return Err(TemplateError::UnclosedGroup),
                        }
                    }
                    let phrases: Vec<String> =
                        body.split('|').map(str::to_string).collect();
                    if phrases.iter().any(String::is_empty) {
                        return Err(TemplateError::EmptyAlternative(body));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Alternatives(phrases));
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Template { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn render(&self, values: &PlaceholderValues<'_>, rng: &mut impl Rng) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(Placeholder::RestaurantName) => {
                    out.push_str(values.restaurant_name)
                }
                Segment::Placeholder(Placeholder::DishName) => out.push_str(values.dish_name),
                Segment::Placeholder(Placeholder::Price) => out.push_str(values.price),
                Segment::Alternatives(phrases) => {
                    let idx = rng.random_range(0..phrases.len());
                    out.push_str(&phrases[idx]);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn values() -> PlaceholderValues<'static> {
        PlaceholderValues {
            restaurant_name: "Joe's Diner",
            dish_name: "Burger",
            price: "$10",
        }
    }

    #[test]
    fn parses_literals_placeholders_and_groups() {
        let t = Template::parse("{restaurantName} was [great|fine], we had {dishName}.").unwrap();
        assert_eq!(
            t.segments(),
            &[
                Segment::Placeholder(Placeholder::RestaurantName),
                Segment::Literal(" was ".to_string()),
                Segment::Alternatives(vec!["great".to_string(), "fine".to_string()]),
                Segment::Literal(", we had ".to_string()),
                Segment::Placeholder(Placeholder::DishName),
                Segment::Literal(".".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_malformed_templates() {
        assert_eq!(
            Template::parse("{mystery}").unwrap_err(),
            TemplateError::UnknownPlaceholder("mystery".to_string())
        );
        assert_eq!(
            Template::parse("{restaurantName").unwrap_err(),
            TemplateError::UnclosedPlaceholder
        );
        assert_eq!(Template::parse("[a|b").unwrap_err(), TemplateError::UnclosedGroup);
        assert_eq!(Template::parse("[a[b]]").unwrap_err(), TemplateError::NestedGroup);
        assert_eq!(
            Template::parse("[a||b]").unwrap_err(),
            TemplateError::EmptyAlternative("a||b".to_string())
        );
    }

    #[test]
    fn render_picks_exactly_one_phrase_per_group() {
        let t = Template::parse("[red|green|blue] and [red|green|blue]").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let out = t.render(&values(), &mut rng);
        let words: Vec<&str> = out.split(" and ").collect();
        assert_eq!(words.len(), 2);
        for word in words {
            assert!(["red", "green", "blue"].contains(&word), "got {word}");
        }
        assert!(!out.contains('['));
        assert!(!out.contains('|'));
    }

    #[test]
    fn render_is_deterministic_for_a_fixed_seed() {
        let t = Template::parse("{dishName}: [superb|decent|poor] at [lunch|dinner]").unwrap();
        let a = t.render(&values(), &mut StdRng::seed_from_u64(42));
        let b = t.render(&values(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn single_phrase_group_always_resolves_to_it() {
        let t = Template::parse("[only]").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(t.render(&values(), &mut rng), "only");
    }
}
