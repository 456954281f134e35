//! Template-directory loading for the XML bundle generator

use ciqgen_core::scripts::xml::XmlTemplates;
use ciqgen_core::template::{load_template, substitute, Substitutions};
use ciqgen_core::CiqgenError;
use std::fs;

#[test]
fn test_load_all_five_templates() {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in [
        ("03_MO_Function.xml", "<mo/>"),
        ("04_LNR_Function.xml", "<lnr enbid=\"{enbid}\"/>"),
        ("08_FeatureActivation.xml", "<feat/>"),
        ("LTE_Cells_Template.xml", "<cell id=\"{EutranCellFDDId}\"/>"),
        ("05_Cell_Add_MO_Template.xml", "<add id=\"{EutranCellFDDId}\"/>"),
    ] {
        fs::write(dir.path().join(name), body).unwrap();
    }

    let templates = XmlTemplates::load(dir.path()).unwrap();
    assert_eq!(templates.mo_function, "<mo/>");
    assert_eq!(templates.lnr_function, "<lnr enbid=\"{enbid}\"/>");
}

#[test]
fn test_missing_template_names_file_and_dir() {
    let dir = tempfile::tempdir().unwrap();
    let err = XmlTemplates::load(dir.path()).unwrap_err();
    match err {
        CiqgenError::TemplateNotFound { name, dir: reported } => {
            assert_eq!(name, "03_MO_Function.xml");
            assert_eq!(reported, dir.path());
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_loaded_template_substitutes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("frag.xml"), "<x tac=\"{tac}\"/>").unwrap();

    let template = load_template(dir.path(), "frag.xml").unwrap();
    let mut values = Substitutions::new();
    values.insert("tac".to_string(), "310".to_string());
    assert_eq!(substitute(&template, &values), "<x tac=\"310\"/>");
}
