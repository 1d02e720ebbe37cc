//! End-to-end generation runs against a temporary output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sharpener::config::Config;
use sharpener::context::GenerationContext;
use sharpener::error::AppError;
use sharpener::filer::DirectoryFiler;
use sharpener::manifest::Manifest;
use sharpener::pipeline::{Generator, RunReport};
use sharpener::resolver::StructuralResolver;

const COMPONENT: &str = "com.github.alexdochioiu.daggersharpener.SharpComponent";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn generate(manifest: &Manifest, out: &Path) -> Result<RunReport, AppError> {
    let ctx = GenerationContext::new(Config::default(), manifest.resolver());
    let generator = Generator::new(ctx)?;
    generator.run(manifest, &mut DirectoryFiler::new(out))
}

fn read(out: &Path, relative: &str) -> String {
    fs::read_to_string(out.join(relative)).unwrap()
}

#[test]
fn test_component_with_provides() {
    let manifest = Manifest::from_json(&format!(
        r#"{{
            "declarations": [{{
                "name": "com.example.Foo",
                "kind": "class",
                "annotations": [{{
                    "name": "{COMPONENT}",
                    "values": {{ "provides": ["com.example.Bar.class"] }}
                }}]
            }}]
        }}"#
    ))
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    let report = generate(&manifest, out.path()).unwrap();

    assert!(!report.has_errors());
    assert_eq!(report.models, 1);
    assert_eq!(
        report.written,
        vec![
            out.path().join("com/example/SharpFooScope.java"),
            out.path().join("com/example/SharpFooComponent.java"),
        ]
    );

    let expected = "\
// Generated by DaggerSharpener
package com.example;

import dagger.Component;

@Component
@SharpFooScope
public interface SharpFooComponent {
  Foo inject(Foo thisClass);

  Bar provideBar();
}
";
    assert_eq!(read(out.path(), "com/example/SharpFooComponent.java"), expected);

    let expected_scope = "\
// Generated by DaggerSharpener
package com.example;

import java.lang.annotation.ElementType;
import java.lang.annotation.Retention;
import java.lang.annotation.RetentionPolicy;
import java.lang.annotation.Target;
import javax.inject.Scope;

@Scope
@Retention(RetentionPolicy.RUNTIME)
@Target(ElementType.TYPE)
public @interface SharpFooScope {
}
";
    assert_eq!(read(out.path(), "com/example/SharpFooScope.java"), expected_scope);
}

#[test]
fn test_nested_class_generates_into_declaring_package() {
    let manifest = Manifest::from_json(&format!(
        r#"{{
            "declarations": [{{
                "name": "com.example.Outer.Inner",
                "kind": "class",
                "annotations": [
                    {{ "name": "{COMPONENT}" }},
                    {{ "name": "com.github.alexdochioiu.daggersharpener.NoScope" }}
                ]
            }}]
        }}"#
    ))
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    let report = generate(&manifest, out.path()).unwrap();

    assert!(!report.has_errors());
    assert_eq!(
        report.written,
        vec![out.path().join("com/example/SharpInnerComponent.java")]
    );

    let expected = "\
// Generated by DaggerSharpener
package com.example;

import dagger.Component;

@Component
public interface SharpInnerComponent {
  Outer.Inner inject(Outer.Inner thisClass);
}
";
    assert_eq!(read(out.path(), "com/example/SharpInnerComponent.java"), expected);
}

#[test]
fn test_reported_package_overrides_name_convention() {
    let manifest = Manifest::from_json(&format!(
        r#"{{
            "declarations": [{{
                "name": "com.example.legacy.holder",
                "package": "com.example",
                "kind": "class",
                "annotations": [{{ "name": "{COMPONENT}" }}]
            }}]
        }}"#
    ))
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    generate(&manifest, out.path()).unwrap();

    let component = read(out.path(), "com/example/SharpholderComponent.java");
    assert!(component.contains("  legacy.holder inject(legacy.holder thisClass);\n"));
    assert!(out.path().join("com/example/SharpholderScope.java").exists());
}

#[test]
fn test_method_target_aborts_without_output() {
    let manifest = Manifest::from_json(&format!(
        r#"{{
            "declarations": [
                {{ "name": "com.example.Foo", "kind": "class", "annotations": [{{ "name": "{COMPONENT}" }}] }},
                {{ "name": "com.example.Foo.onCreate", "kind": "method", "annotations": [{{ "name": "{COMPONENT}" }}] }}
            ]
        }}"#
    ))
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    let err = generate(&manifest, out.path()).unwrap_err();

    assert!(matches!(err, AppError::InvalidTarget { .. }));
    assert!(err.to_string().contains("'onCreate' (method)"));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_manifest_fixture() {
    let manifest = Manifest::load(fixture("app.json")).unwrap();
    let out = tempfile::tempdir().unwrap();

    let report = generate(&manifest, out.path()).unwrap();

    assert!(!report.has_errors());
    assert_eq!(report.models, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.written.len(), 4);

    // Modules keep their input order.
    let app = read(out.path(), "com/example/SharpAppComponent.java");
    assert!(app.contains("@Component(modules = {AppModule.class, NetworkModule.class})\n"));
    assert!(app.contains("@SharpAppScope\n"));

    // Sharp dependencies come before native ones; the external scope is
    // referenced as is, with no companion.
    let activity = read(out.path(), "com/example/SharpMainActivityComponent.java");
    assert!(activity.contains(
        "@Component(dependencies = {SharpAppComponent.class, HttpComponent.class})\n@ActivityScope\n"
    ));
    assert!(activity.contains("import com.example.scopes.ActivityScope;\n"));
    assert!(!out
        .path()
        .join("com/example/SharpMainActivityScope.java")
        .exists());

    // NoScope: neither a scope tag nor a companion.
    let settings = read(out.path(), "com/example/SharpSettingsComponent.java");
    assert!(settings.contains("@Component\npublic interface SharpSettingsComponent {\n"));
    assert!(!out.path().join("com/example/SharpSettingsScope.java").exists());
}

#[test]
fn test_unknown_module_skips_component() {
    let manifest = Manifest::from_json(&format!(
        r#"{{
            "known_types": [],
            "declarations": [
                {{
                    "name": "com.example.Foo",
                    "kind": "class",
                    "annotations": [{{
                        "name": "{COMPONENT}",
                        "values": {{ "modules": ["com.example.MissingModule.class"] }}
                    }}]
                }},
                {{ "name": "com.example.Bar", "kind": "class", "annotations": [{{ "name": "{COMPONENT}" }}] }}
            ]
        }}"#
    ))
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    let report = generate(&manifest, out.path()).unwrap();

    assert!(report.has_errors());
    assert_eq!(report.skipped, 1);
    assert!(!out.path().join("com/example/SharpFooComponent.java").exists());
    assert!(out.path().join("com/example/SharpBarComponent.java").exists());
}

#[test]
fn test_runs_are_idempotent() {
    let manifest = Manifest::load(fixture("app.json")).unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let first_report = generate(&manifest, first.path()).unwrap();
    generate(&manifest, second.path()).unwrap();

    for path in &first_report.written {
        let relative = path.strip_prefix(first.path()).unwrap();
        assert_eq!(
            fs::read(path).unwrap(),
            fs::read(second.path().join(relative)).unwrap(),
            "{} differs between runs",
            relative.display()
        );
    }
}

#[test]
fn test_invalid_config_emits_nothing() {
    let mut config = Config::default();
    config.naming.scope_pattern = "Scope".to_string();
    let ctx = GenerationContext::new(config, Arc::new(StructuralResolver));

    let err = Generator::new(ctx).err().unwrap();

    assert!(matches!(err, AppError::Initialization(_)));
}
