//! Markdown rendering of resolved mentions

/// Remove every occurrence of the trigger character from `token`.
pub fn strip_trigger(token: &str, trigger: char) -> String {
    token.replace(trigger, "")
}

/// Capitalize the first letter of each whitespace-separated word and
/// lowercase the rest.
///
/// ```
/// use mention_parser::title_case;
///
/// assert_eq!(title_case("aDMIN2"), "Admin2");
/// assert_eq!(title_case("mary ann"), "Mary Ann");
/// ```
pub fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut at_word_start = true;

    for c in name.chars() {
        if c.is_whitespace() {
            titled.push(c);
            at_word_start = true;
        } else if at_word_start {
            titled.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            titled.extend(c.to_lowercase());
        }
    }

    titled
}

/// Render a matched token as a markdown link preceded by one space.
///
/// The route is concatenated with the title-cased name as is.
///
/// ```
/// use mention_parser::render_link;
///
/// assert_eq!(
///     render_link('@', "/users/profile/", "@admin"),
///     " [@Admin](/users/profile/Admin)"
/// );
/// ```
pub fn render_link(trigger: char, route: &str, token: &str) -> String {
    let name = title_case(&strip_trigger(token.trim(), trigger));
    format!(" [{trigger}{name}]({route}{name})")
}
