use criterion::*;
use web_helpers::{CookieLocaleResolver, Locale, RequestScope, TimeZone, http::Request, locale_resolver::parse};

fn bench(c: &mut Criterion) {
    let default_locale = Locale::new("en", "GB", "");
    let default_time_zone = TimeZone::default();

    for value in ["fr_FR", "%22fr-FR Europe/Paris%22", "%22- GMT+01:00%22"] {
        c.bench_function(&format!("parse cookie value {}", value), |b| {
            b.iter(|| parse(black_box(value), &default_locale, &default_time_zone).unwrap())
        });
    }

    let resolver = CookieLocaleResolver::builder().default_locale(default_locale.clone()).build();
    let request = Request::new("GET", "http://localhost/").unwrap()
        .header("Cookie", "JSESSIONID=0123456789; NG_TRANSLATE_LANG_KEY=%22fr-FR GMT%22");
    c.bench_function("resolve from request", |b| {
        b.iter(|| resolver.resolve_locale_context(black_box(&request), &mut RequestScope::new()).unwrap())
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
