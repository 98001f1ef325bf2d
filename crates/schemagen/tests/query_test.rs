use chrono::{NaiveDate, TimeZone, Utc};

use schemagen::query::{BigInt, Duration, ElementType, Expr, LiteralType, Value};
use schemagen::CodegenError;

fn str_lit(s: &str) -> Expr {
    Expr::literal(LiteralType::scalar("std::str"), Value::Str(s.to_string()))
}

#[test]
fn filter_values_render_with_casts() {
    let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let cases = vec![
        (Expr::literal(LiteralType::scalar("std::datetime"), Value::Datetime(when)),
         "<std::datetime>'2024-03-01T12:30:00.000Z'"),
        (Expr::literal(LiteralType::scalar("std::duration"), Value::Duration(Duration::from_secs(5400))),
         "<std::duration>'PT1H30M'"),
        (Expr::literal(
            LiteralType::scalar("cal::local_date"),
            Value::LocalDate(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
        ),
         "<cal::local_date>'2024-02-29'"),
        (Expr::literal(LiteralType::scalar("std::bigint"), Value::BigInt(BigInt::from(-12i128))),
         "<std::bigint>-12n"),
        (str_lit("it's"), "<std::str>'it\\'s'"),
    ];

    for (expr, expected) in cases {
        assert_eq!(expr.to_edgeql().unwrap(), expected);
    }
}

#[test]
fn collections_cast_once_at_the_top() {
    let tags = Expr::literal(
        LiteralType::array(LiteralType::scalar("std::str")),
        Value::Array(vec![Value::Str("a".into()), Value::Str("b".into())]),
    );
    assert_eq!(tags.to_edgeql().unwrap(), "<array<std::str>>['a', 'b']");

    let pair = Expr::literal(
        LiteralType::Tuple(vec![LiteralType::scalar("std::str"), LiteralType::scalar("std::int64")]),
        Value::Tuple(vec![Value::Str("x".into()), Value::Int(1)]),
    );
    assert_eq!(pair.to_edgeql().unwrap(), "<tuple<std::str, std::int64>>('x', 1)");

    let credit = Expr::literal(
        LiteralType::NamedTuple(vec![
            ("role".to_string(), LiteralType::scalar("std::str")),
            ("billing".to_string(), LiteralType::scalar("std::int64")),
        ]),
        Value::NamedTuple(vec![
            ("role".to_string(), Value::Str("lead".into())),
            ("billing".to_string(), Value::Int(1)),
        ]),
    );
    assert_eq!(
        credit.to_edgeql().unwrap(),
        "<tuple<role: std::str, billing: std::int64>>(role := 'lead', billing := 1)"
    );
}

#[test]
fn path_and_set_compose() {
    let cast_names = Expr::path("default::Movie")
        .link("cast", "default::Person")
        .unwrap()
        .property("name", ElementType::scalar("std::str"))
        .unwrap();
    assert_eq!(cast_names.to_edgeql().unwrap(), "default::Movie.cast.name");

    let names = Expr::set(vec![str_lit("Ann"), str_lit("Bo")]).unwrap();
    assert_eq!(names.to_edgeql().unwrap(), "{ <std::str>'Ann', <std::str>'Bo' }");

    let nested = Expr::set(vec![names, cast_names]).unwrap();
    assert_eq!(
        nested.to_edgeql().unwrap(),
        "{ { <std::str>'Ann', <std::str>'Bo' }, default::Movie.cast.name }"
    );
}

#[test]
fn objects_and_values_do_not_mix() {
    let err = Expr::set(vec![Expr::path("default::Movie"), str_lit("x")]).unwrap_err();
    assert!(matches!(err, CodegenError::MixedSet { .. }));
    assert!(err.to_string().starts_with("Invalid arguments to set constructor"));
}
