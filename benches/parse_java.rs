use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use java_syntax::{parse_java, JavaVersion};

const SMALL_JAVA: &str = r#"
package bench;

public class Small {
    private int counter;

    public Small(int counter) {
        this.counter = counter;
    }

    public int increment() {
        return ++counter;
    }
}
"#;

const PATHOLOGICAL_JAVA: &str = r#"
class  Foo{
public static void main(String[]args){
System.out.println("hi"); // comment
if(true){System.out.println("x");}
}
}
"#;

/// A synthetic "medium" compilation unit: a few hundred short methods, the
/// shape a real IDE sees constantly (wide classes, narrow methods) rather
/// than one deeply nested expression.
fn medium_java() -> String {
    let mut out = String::from("package bench;\n\npublic class Medium {\n");
    for i in 0..300u32 {
        out.push_str(&format!(
            "  public int method{i}(int x) {{ int y = x + {i}; return y * 2; }}\n"
        ));
    }
    out.push_str("}\n");
    out
}

/// A chain of nested parenthesized arithmetic well under
/// `ParserConfig::default().max_parse_depth`, to measure the speculative
/// cast/lambda/parenthesized-expression disambiguation cost in isolation
/// from declaration parsing.
fn nested_parens_java(depth: usize) -> String {
    format!(
        "class T {{ void m() {{ int x = {}1{}; }} }}",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

fn bench_parse_java(c: &mut Criterion) {
    let medium = medium_java();
    let nested = nested_parens_java(64);

    let mut group = c.benchmark_group("parse_java");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(30);

    for (id, src) in [
        ("small", SMALL_JAVA),
        ("medium", medium.as_str()),
        ("pathological", PATHOLOGICAL_JAVA),
        ("nested_parens", nested.as_str()),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(id), src, |b, src| {
            b.iter(|| black_box(parse_java(black_box(src), JavaVersion::V21)))
        });
    }

    group.finish();
}

fn bench_depth_guard_rejection(c: &mut Criterion) {
    // The depth guard must reject deeply nested, pathological input cheaply
    // rather than walking the full recursion before giving up; this tracks
    // that the rejection path stays fast as the corpus grows adversarial
    // fixtures.
    let too_deep = nested_parens_java(5_000);

    let mut group = c.benchmark_group("parse_java_depth_guard");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(30);

    group.bench_function("rejects_excessive_nesting", |b| {
        b.iter(|| black_box(parse_java(black_box(&too_deep), JavaVersion::V21)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_java, bench_depth_guard_rejection);
criterion_main!(benches);
