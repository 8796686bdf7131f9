//! Integration tests for annotation parameter lists.
//!
//! These tests exercise the public API the way a class file parser and a dependency graph
//! builder would use it: build a list, normalize it against the annotation class, then read it
//! from several threads.

use classmeta::{prelude::*, Result};
use rayon::prelude::*;
use std::collections::HashSet;

fn boxed_ints(values: &[i32]) -> ParameterValue {
    ParameterValue::ObjectArray(values.iter().map(|v| PrimitiveValue::Int(*v).into()).collect())
}

/// Lookup by name returns the first matching entry, or nothing
#[test]
fn test_lookup_by_name() -> Result<()> {
    let mut list = ParameterValueList::new();
    list.push(AnnotationParameter::new("value", ParameterValue::from("first")))?;
    list.push(AnnotationParameter::new("timeout", PrimitiveValue::Long(30).into()))?;
    list.push(AnnotationParameter::new("value", ParameterValue::from("second")))?;

    assert_eq!(list.get("value").map(AnnotationParameter::name), Some("value"));
    assert_eq!(list.get_value("value"), Some(&ParameterValue::from("first")));
    assert_eq!(
        list.get_value("timeout"),
        Some(&ParameterValue::Primitive(PrimitiveValue::Long(30)))
    );
    assert!(list.get("retries").is_none());
    assert!(list.get_value("retries").is_none());
    Ok(())
}

/// Every write on the shared empty list fails and leaves it empty
#[test]
fn test_empty_list_is_immutable() {
    let empty = ParameterValueList::empty_list();
    assert_eq!(empty.len(), 0);

    let entry = AnnotationParameter::new("value", ParameterValue::from("x"));
    let mut list = empty.clone();

    let results = [
        list.push(entry.clone()).map(|_| ()),
        list.insert(0, entry.clone()).map(|_| ()),
        list.remove(0).map(|_| ()),
        list.remove_item(&entry).map(|_| ()),
        list.append_all(vec![entry.clone()]).map(|_| ()),
        list.insert_all(0, vec![entry.clone()]).map(|_| ()),
        list.remove_all(&[entry.clone()]).map(|_| ()),
        list.retain(|_| false).map(|_| ()),
        list.clear(),
        list.set(0, entry.clone()).map(|_| ()),
    ];

    for result in results {
        assert!(matches!(result, Err(Error::InvalidOperation(_))));
        assert_eq!(list.len(), 0);
    }
    assert_eq!(empty.len(), 0);
    assert!(std::ptr::eq(empty, ParameterValueList::empty_list()));
}

/// Iterating the empty list from several threads never fails
///
/// The shared list is only reachable through `&'static`, so the sorting thread sorts a clone
/// (which keeps the immutable flag) while the others iterate the singleton itself.
#[test]
fn test_empty_list_concurrent_iteration() {
    let empty = ParameterValueList::empty_list();

    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(move || {
                    let mut seen = 0;
                    for _ in 0..10_000 {
                        seen += empty.iter().count();
                        seen += empty.iter().rev().count();
                    }
                    seen
                })
            })
            .collect();

        let sorter = scope.spawn(move || {
            let mut seen = 0;
            for _ in 0..10_000 {
                let mut snapshot = empty.clone();
                snapshot.sort_by_name();
                seen += snapshot.iter().count();
                seen += empty.par_iter().count();
            }
            seen
        });

        for reader in readers {
            assert_eq!(reader.join().unwrap(), 0);
        }
        assert_eq!(sorter.join().unwrap(), 0);
    });
}

/// Reference discovery follows class references and nested annotations
#[test]
fn test_find_referenced_class_names() -> Result<()> {
    let list = ParameterValueList::from(vec![
        AnnotationParameter::new("name", ParameterValue::from("com.example.Ignored")),
        AnnotationParameter::new(
            "type",
            ParameterValue::ClassRef(AnnotationClassRef::from_descriptor("Lcom/example/Foo;")?),
        ),
        AnnotationParameter::new("nested", AnnotationInfo::marker("com.example.Bar").into()),
    ]);

    let mut referenced = HashSet::new();
    list.find_referenced_class_names(&mut referenced);
    let expected: HashSet<String> = ["com.example.Foo", "com.example.Bar"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(referenced, expected);

    let mut with_prior: HashSet<String> =
        ["com.example.Foo", "com.example.Prior"].into_iter().map(String::from).collect();
    list.find_referenced_class_names(&mut with_prior);
    assert_eq!(with_prior.len(), 3);
    assert!(with_prior.contains("com.example.Prior"));
    assert!(with_prior.is_superset(&expected));
    Ok(())
}

/// Deeply nested values are all visited
#[test]
fn test_find_referenced_class_names_deep() {
    let mut value: ParameterValue =
        ParameterValue::Enum(AnnotationEnumValue::new("com.example.Level", "DEEP"));
    for depth in 0..16 {
        let inner = AnnotationInfo::new(
            format!("com.example.Layer{}", depth),
            ParameterValueList::from(vec![AnnotationParameter::new(
                "value",
                ParameterValue::ObjectArray(vec![value]),
            )]),
        );
        value = inner.into();
    }
    let list = ParameterValueList::from(vec![AnnotationParameter::new("root", value)]);

    let mut referenced = HashSet::new();
    list.find_referenced_class_names(&mut referenced);
    assert_eq!(referenced.len(), 17);
    assert!(referenced.contains("com.example.Level"));
    assert!(referenced.contains("com.example.Layer0"));
    assert!(referenced.contains("com.example.Layer15"));
}

/// Boxed Integer[] becomes int[] when the method returns int[]; other entries are untouched
#[test]
fn test_convert_wrapper_arrays() -> Result<()> {
    let class = ClassDescriptor::new("com.example.Listen", ClassModifiers::ANNOTATION)
        .with_method("ports", "()[I")
        .with_method("hosts", "()[Ljava/lang/String;")
        .with_method("backlog", "()I")
        .with_method("mode", "()Lcom/example/Mode;");

    let hosts = ParameterValue::ObjectArray(vec![
        ParameterValue::from("localhost"),
        ParameterValue::from("::1"),
    ]);
    let backlog = ParameterValue::Primitive(PrimitiveValue::Int(128));
    let mode = ParameterValue::Enum(AnnotationEnumValue::new("com.example.Mode", "TCP"));

    let mut list = ParameterValueList::from(vec![
        AnnotationParameter::new("hosts", hosts.clone()),
        AnnotationParameter::new("ports", boxed_ints(&[8080, 80, 443])),
        AnnotationParameter::new("backlog", backlog.clone()),
        AnnotationParameter::new("mode", mode.clone()),
    ]);
    list.convert_wrapper_arrays_to_primitive_arrays(&class)?;

    assert_eq!(
        list.get_value("ports"),
        Some(&ParameterValue::PrimitiveArray(PrimitiveArray::Int(vec![8080, 80, 443])))
    );
    assert_eq!(list.get_value("hosts"), Some(&hosts));
    assert_eq!(list.get_value("backlog"), Some(&backlog));
    assert_eq!(list.get_value("mode"), Some(&mode));
    assert_eq!(list.names(), vec!["hosts", "ports", "backlog", "mode"]);
    Ok(())
}

/// Every primitive kind converts element for element
#[test]
fn test_convert_all_primitive_kinds() -> Result<()> {
    let class = ClassDescriptor::new("com.example.All", ClassModifiers::ANNOTATION)
        .with_method("z", "()[Z")
        .with_method("b", "()[B")
        .with_method("c", "()[C")
        .with_method("s", "()[S")
        .with_method("j", "()[J")
        .with_method("f", "()[F")
        .with_method("d", "()[D");

    let mut list = ParameterValueList::from(vec![
        AnnotationParameter::new("z", ParameterValue::ObjectArray(vec![PrimitiveValue::Boolean(true).into()])),
        AnnotationParameter::new("b", ParameterValue::ObjectArray(vec![PrimitiveValue::Byte(-8).into()])),
        AnnotationParameter::new("c", ParameterValue::ObjectArray(vec![PrimitiveValue::Char(0xD800).into()])),
        AnnotationParameter::new("s", ParameterValue::ObjectArray(vec![PrimitiveValue::Short(300).into()])),
        AnnotationParameter::new("j", ParameterValue::ObjectArray(vec![PrimitiveValue::Long(1 << 40).into()])),
        AnnotationParameter::new("f", ParameterValue::ObjectArray(vec![PrimitiveValue::Float(0.5).into()])),
        AnnotationParameter::new("d", ParameterValue::ObjectArray(vec![PrimitiveValue::Double(2.25).into()])),
    ]);
    list.convert_wrapper_arrays_to_primitive_arrays(&class)?;

    let expected = [
        PrimitiveArray::Boolean(vec![true]),
        PrimitiveArray::Byte(vec![-8]),
        PrimitiveArray::Char(vec![0xD800]),
        PrimitiveArray::Short(vec![300]),
        PrimitiveArray::Long(vec![1 << 40]),
        PrimitiveArray::Float(vec![0.5]),
        PrimitiveArray::Double(vec![2.25]),
    ];
    for (entry, expected) in list.iter().zip(expected) {
        assert_eq!(entry.value(), &ParameterValue::PrimitiveArray(expected));
    }
    Ok(())
}

/// Construction from an existing sequence keeps its order
#[test]
fn test_construction_preserves_order() {
    let source: Vec<AnnotationParameter> = (0..10)
        .rev()
        .map(|i| AnnotationParameter::new(format!("p{}", i), PrimitiveValue::Int(i).into()))
        .collect();

    let list = ParameterValueList::from(source.clone());
    assert!(list.iter().eq(source.iter()));

    let collected: ParameterValueList = source.iter().cloned().collect();
    assert_eq!(collected, list);

    let by_ref: Vec<&AnnotationParameter> = (&list).into_iter().collect();
    assert_eq!(by_ref.len(), 10);
    assert_eq!(by_ref[0].name(), "p9");
}

/// Normalized lists can be shared with parallel readers
#[test]
fn test_parallel_readers() -> Result<()> {
    let class = ClassDescriptor::new("com.example.Ids", ClassModifiers::ANNOTATION)
        .with_method("ids", "()[I");
    let mut list = ParameterValueList::with_capacity(1);
    list.push(AnnotationParameter::new("ids", boxed_ints(&[1, 2, 3])))?;
    list.convert_wrapper_arrays_to_primitive_arrays(&class)?;

    let total: usize = (0..64)
        .into_par_iter()
        .map(|_| match list.get_value("ids") {
            Some(ParameterValue::PrimitiveArray(array)) => array.len(),
            _ => 0,
        })
        .sum();
    assert_eq!(total, 64 * 3);
    Ok(())
}
