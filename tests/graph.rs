//! Integration tests for documentation graph construction invariants.
//!
//! Exercises the fail-fast validation of every ingestion entry point: duplicate
//! registration, unknown assemblies, namespace/identity mismatches, nested-type
//! relationships and member defining-type checks. Error message assertions use
//! `contains` so wording extensions do not break them.

use dotdocs::{prelude::*, Result};

fn build_graph() -> Result<DocGraph> {
    let graph = DocGraph::new();
    graph.add_assembly("Acme.Widgets", Some("2.1.0".to_string()))?;
    Ok(graph)
}

#[test]
fn test_assembly_registration() -> Result<()> {
    let graph = build_graph()?;

    let assembly = graph.assembly("Acme.Widgets").expect("assembly registered");
    assert_eq!(assembly.name(), "Acme.Widgets");
    assert_eq!(assembly.version(), Some("2.1.0"));

    let error = graph.add_assembly("Acme.Widgets", None).unwrap_err();
    assert!(matches!(error, Error::InconsistentModel(_)));
    assert!(error.to_string().contains("already exists"));
    Ok(())
}

#[test]
fn test_inconsistent_model_error_prefix() -> Result<()> {
    let graph = build_graph()?;
    graph.add_assembly("Acme.Widgets.Extras", None)?;

    let error = graph.add_assembly("Acme.Widgets", None).unwrap_err();
    assert!(error
        .to_string()
        .starts_with("Inconsistent documentation model - "));
    Ok(())
}

#[test]
fn test_namespace_hierarchy_created_on_demand() -> Result<()> {
    let graph = build_graph()?;
    graph.add_type(
        "Acme.Widgets",
        TypeIdentity::new("Acme.Widgets.Controls", "Button")?,
    )?;

    // The full ancestor chain exists even though only the leaf was named.
    for path in ["Acme", "Acme.Widgets", "Acme.Widgets.Controls"] {
        assert!(graph.namespace(path).is_some(), "missing namespace {path}");
    }

    let leaf = graph.namespace("Acme.Widgets.Controls").unwrap();
    assert_eq!(leaf.name(), "Controls");
    assert_eq!(leaf.parent_path(), Some("Acme.Widgets"));
    assert_eq!(leaf.types().count(), 1);
    Ok(())
}

#[test]
fn test_type_registration_invariants() -> Result<()> {
    let graph = build_graph()?;
    let widget = TypeIdentity::new("Acme", "Widget")?;

    // Unknown assembly.
    let error = graph
        .add_type("Unknown.Assembly", widget.clone())
        .unwrap_err();
    assert!(error.to_string().contains("unknown assembly"));

    // Successful registration.
    let type_doc = graph.add_type("Acme.Widgets", widget.clone())?;
    assert_eq!(type_doc.identity, widget);
    assert_eq!(type_doc.assembly().unwrap().name(), "Acme.Widgets");

    // Duplicate registration.
    let error = graph.add_type("Acme.Widgets", widget.clone()).unwrap_err();
    assert!(error.to_string().contains("Type 'Acme.Widget' already exists"));

    // Nested identities cannot enter at namespace level.
    let nested = TypeIdentity::nested(widget, "Builder")?;
    let error = graph.add_type("Acme.Widgets", nested).unwrap_err();
    assert!(error.to_string().contains("nested in type 'Acme.Widget'"));
    Ok(())
}

#[test]
fn test_namespace_mismatch_rejected() -> Result<()> {
    let graph = build_graph()?;
    let wrong = graph.get_or_add_namespace("Wrong.Namespace");

    let error = graph
        .add_type_to_namespace("Acme.Widgets", &wrong, TypeIdentity::new("Acme", "Widget")?)
        .unwrap_err();

    assert!(error.to_string().contains(
        "Mismatch between namespace of type 'Acme.Widget' and id of parent namespace 'Wrong.Namespace'"
    ));
    assert_eq!(graph.type_count(), 0);
    Ok(())
}

#[test]
fn test_nested_type_invariants() -> Result<()> {
    let graph = build_graph()?;
    let widget = TypeIdentity::new("Acme", "Widget")?;
    let gadget = TypeIdentity::new("Acme", "Gadget")?;
    let parent = graph.add_type("Acme.Widgets", widget.clone())?;
    graph.add_type("Acme.Widgets", gadget.clone())?;

    // A non-nested identity cannot become a nested type.
    let error = graph.add_nested_type(&parent, gadget.clone()).unwrap_err();
    assert!(error.to_string().contains(
        "Cannot initialize nested type for type 'Acme.Gadget' because it has no declaring type"
    ));

    // A nested identity must name the actual parent.
    let elsewhere = TypeIdentity::nested(gadget, "Builder")?;
    let error = graph.add_nested_type(&parent, elsewhere).unwrap_err();
    assert!(error.to_string().contains(
        "Mismatch between id of type 'Acme.Gadget.Builder' and id of declaring type 'Acme.Widget'"
    ));

    // Correct nesting registers the type under the parent and in the index.
    let builder = TypeIdentity::nested_generic(widget, "Builder", 1)?;
    let nested = graph.add_nested_type(&parent, builder.clone())?;
    assert_eq!(parent.nested_types().count(), 1);
    assert_eq!(graph.get_type(&builder).unwrap().identity, nested.identity);
    Ok(())
}

#[test]
fn test_member_defining_type_invariant() -> Result<()> {
    let graph = build_graph()?;
    let widget = TypeIdentity::new("Acme", "Widget")?;
    let gadget = TypeIdentity::new("Acme", "Gadget")?;
    let type_doc = graph.add_type("Acme.Widgets", widget.clone())?;

    let foreign = MethodDoc::new(MethodIdentity::new(gadget, "Run", 0, vec![], None)?);
    let error = type_doc.add_method(foreign).unwrap_err();
    assert!(error.to_string().contains(
        "Cannot add member with a declaring type of 'Acme.Gadget' to type 'Acme.Widget'"
    ));

    let own = MethodDoc::new(MethodIdentity::new(widget.clone(), "Run", 0, vec![], None)?);
    type_doc.add_method(own)?;
    assert_eq!(type_doc.methods().count(), 1);

    // Same invariant for the other member kinds.
    let wrong_type = TypeIdentity::new("Acme", "Gadget")?;
    assert!(type_doc
        .add_property(PropertyDoc::new(PropertyIdentity::new(
            wrong_type.clone(),
            "Count",
            vec![]
        )?))
        .is_err());
    assert!(type_doc
        .add_field(FieldDoc::new(FieldIdentity::new(wrong_type.clone(), "size")?))
        .is_err());
    assert!(type_doc
        .add_event(EventDoc::new(EventIdentity::new(wrong_type, "Clicked")?))
        .is_err());
    Ok(())
}

#[test]
fn test_duplicate_member_rejected() -> Result<()> {
    let graph = build_graph()?;
    let widget = TypeIdentity::new("Acme", "Widget")?;
    let type_doc = graph.add_type("Acme.Widgets", widget.clone())?;

    let int32 = TypeSignature::named("System", "Int32")?;
    let identity = MethodIdentity::new(widget.clone(), "Load", 0, vec![int32.clone()], None)?;
    type_doc.add_method(MethodDoc::new(identity.clone()))?;

    let error = type_doc.add_method(MethodDoc::new(identity)).unwrap_err();
    assert!(error.to_string().contains("already exists in type 'Acme.Widget'"));

    // A different overload is not a duplicate.
    let overload = MethodIdentity::new(widget, "Load", 0, vec![int32.clone(), int32], None)?;
    type_doc.add_method(MethodDoc::new(overload))?;
    assert_eq!(type_doc.methods().count(), 2);
    Ok(())
}

#[test]
fn test_failed_insertion_leaves_graph_unchanged() -> Result<()> {
    let graph = build_graph()?;
    let widget = TypeIdentity::new("Acme", "Widget")?;
    let parent = graph.add_type("Acme.Widgets", widget.clone())?;

    let count_before = graph.type_count();
    let gadget = TypeIdentity::new("Acme", "Gadget")?;
    let _ = graph.add_nested_type(&parent, TypeIdentity::nested(gadget, "Builder")?);

    assert_eq!(graph.type_count(), count_before);
    assert_eq!(parent.nested_types().count(), 0);
    Ok(())
}

#[test]
fn test_completed_graph_is_shareable_across_threads() -> Result<()> {
    let graph = build_graph()?;
    let widget = TypeIdentity::new("Acme", "Widget")?;
    graph.add_type("Acme.Widgets", widget.clone())?;

    let graph = std::sync::Arc::new(graph);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = graph.clone();
            let widget = widget.clone();
            std::thread::spawn(move || graph.get_type(&widget).is_some())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("reader thread panicked"));
    }
    Ok(())
}
