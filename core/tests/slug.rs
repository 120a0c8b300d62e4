use digibloom_core::slug::{
    is_valid_slug, sanitize_title, slug_for_title, suffix_from_seed, Slug, SlugError,
    SLUG_SUFFIX_LEN,
};

#[test]
fn titles_sanitize_to_lowercase_hyphenated_stems() {
    assert_eq!(sanitize_title("Hope"), "hope");
    assert_eq!(sanitize_title("Hope for Tomorrow"), "hope-for-tomorrow");
    assert_eq!(sanitize_title("  Stay strong!!  "), "stay-strong");
    assert_eq!(sanitize_title("C'est la vie"), "c-est-la-vie");
    assert_eq!(sanitize_title("100% sunshine"), "100-sunshine");
}

#[test]
fn unusable_titles_fall_back_to_a_stem() {
    let slug = slug_for_title("!!!", 7);
    assert!(slug.starts_with("flower-"), "got {slug}");
    assert!(is_valid_slug(&slug));
}

#[test]
fn slugs_start_with_the_sanitized_title() {
    let slug = slug_for_title("Hope", 42);
    assert!(slug.starts_with("hope-"), "got {slug}");
    assert_eq!(slug.len(), "hope-".len() + SLUG_SUFFIX_LEN);
    assert!(is_valid_slug(&slug));
}

#[test]
fn suffixes_are_deterministic_per_seed() {
    assert_eq!(suffix_from_seed(1), suffix_from_seed(1));
    assert_ne!(suffix_from_seed(1), suffix_from_seed(2));
    let suffix = suffix_from_seed(0xDEAD_BEEF);
    assert_eq!(suffix.len(), SLUG_SUFFIX_LEN);
    assert!(suffix
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
}

#[test]
fn slug_parse_rejects_bad_input() {
    assert!(Slug::parse("red-tulip-ab12cd34").is_ok());
    assert_eq!(Slug::parse(""), Err(SlugError::Empty));
    assert_eq!(
        Slug::parse("Red-Tulip"),
        Err(SlugError::InvalidCharacter { ch: 'R', index: 0 })
    );
    assert!(matches!(
        Slug::parse("no spaces"),
        Err(SlugError::InvalidCharacter { ch: ' ', .. })
    ));
    let oversized = "a".repeat(200);
    assert!(matches!(
        Slug::parse(&oversized),
        Err(SlugError::TooLong { .. })
    ));
}

#[test]
fn very_long_titles_still_produce_bounded_slugs() {
    let title = "a very ".repeat(40);
    let slug = slug_for_title(&title, 3);
    assert!(slug.len() <= 120, "slug too long: {}", slug.len());
    assert!(is_valid_slug(&slug));
}
