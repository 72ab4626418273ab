use ir_vars_rs::{
    GlobalOptions, IrError, PrintEnv, ProcName, ProgramVar, SourceFile, SourceLoc,
    TmpNameGenerator,
};
use std::cmp::Ordering;

/// A population of variables covering every kind and naming convention.
fn population() -> Vec<ProgramVar> {
    let foo = ProcName::new("foo");
    let bar = ProcName::new("bar");
    let names = TmpNameGenerator::new();
    let loc = SourceLoc::new(SourceFile::new("main.c"), 42, 7);

    vec![
        ProgramVar::local("x", &foo),
        ProgramVar::local("x", &bar),
        ProgramVar::local("y", &foo),
        ProgramVar::callee("x", &foo),
        ProgramVar::local("x", &foo).to_seed(),
        ProgramVar::global("g", GlobalOptions::default()),
        ProgramVar::global(
            "g",
            GlobalOptions {
                translation_unit: Some(SourceFile::new("main.c")),
                ..Default::default()
            },
        ),
        ProgramVar::global(
            "cache",
            GlobalOptions {
                is_static_local: true,
                ..Default::default()
            },
        ),
        ProgramVar::fresh_tmp(&names, "t", &foo),
        ProgramVar::abduced_return(&foo, &loc),
        ProgramVar::abduced_ref_param(&foo, 2, &loc),
        ProgramVar::return_variable(&foo),
        ProgramVar::return_param_variable(&foo),
        ProgramVar::local("this", &foo),
        ProgramVar::local("self", &bar),
    ]
}

#[test]
fn test_compare_is_reflexive_and_consistent_with_equality() {
    for v in &population() {
        assert_eq!(v.compare(v), Ordering::Equal);
        assert_eq!(v, v);
    }
    for a in &population() {
        for b in &population() {
            assert_eq!(a == b, a.compare(b) == Ordering::Equal);
        }
    }
}

#[test]
fn test_compare_is_antisymmetric_and_transitive() {
    let vars = population();
    for a in &vars {
        for b in &vars {
            assert_eq!(a.compare(b), b.compare(a).reverse());
        }
    }
    for a in &vars {
        for b in &vars {
            for c in &vars {
                if a.compare(b) != Ordering::Greater && b.compare(c) != Ordering::Greater {
                    assert_ne!(a.compare(c), Ordering::Greater);
                }
            }
        }
    }
}

#[test]
fn test_compare_modulo_this_collapses_receivers() {
    let draw = ProcName::new("Widget::draw");
    let resize = ProcName::new("Widget::resize");
    let this_a = ProgramVar::local("this", &draw);
    let this_b = ProgramVar::local("this", &resize);
    let self_a = ProgramVar::local("self", &draw);
    let self_b = ProgramVar::local("self", &resize);

    // Different owning procedures, still one receiver class.
    assert_ne!(this_a, this_b);
    assert_eq!(this_a.compare_modulo_this(&this_b), Ordering::Equal);
    assert_eq!(self_a.compare_modulo_this(&self_b), Ordering::Equal);
    assert_eq!(this_a.compare_modulo_this(&self_b), Ordering::Equal);

    // Callee receivers are receivers too.
    let this_callee = this_a.to_callee(&resize);
    assert_eq!(this_callee.compare_modulo_this(&this_b), Ordering::Equal);

    // Non-receivers fall back to the total order.
    let x = ProgramVar::local("x", &draw);
    assert_eq!(this_a.compare_modulo_this(&x), this_a.compare(&x));
    assert_ne!(this_a.compare_modulo_this(&x), Ordering::Equal);
}

#[test]
fn test_to_callee_always_yields_callee() {
    let p = ProcName::new("recurse");
    for v in &population() {
        let callee = v.to_callee(&p);
        assert!(callee.is_callee());
        assert!(callee.is_abduced());
        assert_eq!(callee.declaring_procedure(), Some(&p));
    }
}

#[test]
fn test_to_seed_yields_seed_scoped_to_the_local() {
    let p = ProcName::new("foo");
    let local = ProgramVar::local("n", &p);
    let seed = local.to_seed();
    assert!(seed.is_seed());
    assert_eq!(seed.declaring_procedure(), Some(&p));
    assert_ne!(seed, local);
    assert_eq!(seed.simplified_name(), "n");
}

#[test]
fn test_static_local_global_holds_both_classifications() {
    let g = ProgramVar::global(
        "counter",
        GlobalOptions {
            is_static_local: true,
            ..Default::default()
        },
    );
    assert!(g.is_global());
    assert!(g.is_static_local());
    assert_eq!(g.declaring_procedure(), None);
}

#[test]
fn test_translation_unit_is_global_only() {
    let p = ProcName::new("foo");
    let tu = SourceFile::new("util.c");
    let g = ProgramVar::global(
        "g",
        GlobalOptions {
            translation_unit: Some(tu.clone()),
            ..Default::default()
        },
    );
    assert_eq!(g.translation_unit().unwrap(), Some(&tu));

    let unattributed = ProgramVar::global("h", GlobalOptions::default());
    assert_eq!(unattributed.translation_unit().unwrap(), None);

    for v in [
        ProgramVar::local("x", &p),
        ProgramVar::callee("x", &p),
        ProgramVar::local("x", &p).to_seed(),
    ] {
        let err = v.translation_unit().unwrap_err();
        assert!(matches!(err, IrError::InvalidUsage { .. }));
    }
}

#[test]
fn test_abduced_naming_is_deterministic() {
    let p = ProcName::new("foo");
    let loc = SourceLoc::new(SourceFile::new("main.c"), 42, 7);

    let a = ProgramVar::abduced_ref_param(&p, 2, &loc);
    let b = ProgramVar::abduced_ref_param(&p, 2, &loc);
    assert_eq!(a, b);

    let other_index = ProgramVar::abduced_ref_param(&p, 3, &loc);
    assert_ne!(a, other_index);

    let other_loc = SourceLoc::new(SourceFile::new("main.c"), 42, 8);
    let moved = ProgramVar::abduced_ref_param(&p, 2, &other_loc);
    assert_ne!(a, moved);

    let ret_a = ProgramVar::abduced_return(&p, &loc);
    let ret_b = ProgramVar::abduced_return(&p, &loc);
    assert_eq!(ret_a, ret_b);
    assert_ne!(ret_a, a);
}

#[test]
fn test_return_variables_are_canonical_per_procedure() {
    let foo = ProcName::new("foo");
    let ret_a = ProgramVar::return_variable(&foo);
    let ret_b = ProgramVar::return_variable(&foo);
    assert_eq!(ret_a, ret_b);

    let ret_param = ProgramVar::return_param_variable(&foo);
    assert_ne!(ret_a, ret_param);

    let bar = ProcName::new("bar");
    assert_ne!(ret_a, ProgramVar::return_variable(&bar));
}

#[test]
fn test_initializer_procedure_for_globals() {
    let g = ProgramVar::global("table", GlobalOptions::default());
    let init = g.initializer_procedure().unwrap();
    assert_eq!(g.initializer_procedure().unwrap(), init);

    let p = ProcName::new("foo");
    assert_eq!(ProgramVar::local("x", &p).initializer_procedure(), None);
}

#[test]
fn test_variables_serialize() {
    let vars = population();
    let json = serde_json::to_string(&vars).expect("Failed to serialize variables");
    assert!(json.contains("\"Local\""));
    assert!(json.contains("\"Global\""));

    let back: Vec<ProgramVar> = serde_json::from_str(&json).expect("Failed to deserialize");
    assert_eq!(vars, back);
}

#[test]
fn test_pp_is_presentation_only() {
    let p = ProcName::new("foo");
    let v = ProgramVar::local("x", &p);
    let plain = PrintEnv::default();
    let verbose = PrintEnv::verbose();

    assert_eq!(format!("{}", v.display(&plain)), "&x");
    assert_eq!(format!("{}", v.display(&verbose)), "&x@foo");
    assert_eq!(format!("{}", v.display_value(&plain)), "x");
    assert_eq!(v.to_string(), "x");
}
