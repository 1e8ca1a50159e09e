//! WGSL validation for the starfield shader pair.
//!
//! Parses and validates the shader with naga, the same front end wgpu uses,
//! so a broken shader fails here instead of at pipeline creation.

use starfield::shader::{FRAGMENT_ENTRY, STARFIELD_SHADER, VERTEX_ENTRY};
use starfield::Uniforms;

fn parse_and_validate(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

#[test]
fn test_starfield_shader_validates() {
    parse_and_validate(STARFIELD_SHADER).expect("starfield shader should be valid");
}

#[test]
fn test_entry_points_exist() {
    let module = parse_and_validate(STARFIELD_SHADER).unwrap();

    let vertex = module
        .entry_points
        .iter()
        .find(|ep| ep.name == VERTEX_ENTRY)
        .expect("vertex entry point");
    assert_eq!(vertex.stage, naga::ShaderStage::Vertex);

    let fragment = module
        .entry_points
        .iter()
        .find(|ep| ep.name == FRAGMENT_ENTRY)
        .expect("fragment entry point");
    assert_eq!(fragment.stage, naga::ShaderStage::Fragment);
}

#[test]
fn test_uniform_struct_matches_rust_layout() {
    let module = parse_and_validate(STARFIELD_SHADER).unwrap();

    let (_, ty) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some("Uniforms"))
        .expect("Uniforms struct in shader");

    match &ty.inner {
        naga::TypeInner::Struct { members, span } => {
            assert_eq!(*span as usize, Uniforms::SIZE);

            let offset_of = |name: &str| {
                members
                    .iter()
                    .find(|m| m.name.as_deref() == Some(name))
                    .map(|m| m.offset)
                    .unwrap_or_else(|| panic!("member {name} missing"))
            };
            assert_eq!(offset_of("proj"), 64);
            assert_eq!(offset_of("viewport"), 128);
            assert_eq!(offset_of("time"), 136);
            assert_eq!(offset_of("half_depth"), 140);
            assert_eq!(offset_of("size_attenuation"), 144);
            assert_eq!(offset_of("max_point_size"), 148);
        }
        other => panic!("Uniforms is not a struct: {:?}", other),
    }
}

#[test]
fn test_vertex_stage_reads_three_instance_attributes() {
    let module = parse_and_validate(STARFIELD_SHADER).unwrap();
    let vertex = module
        .entry_points
        .iter()
        .find(|ep| ep.name == VERTEX_ENTRY)
        .unwrap();

    let locations: Vec<u32> = vertex
        .function
        .arguments
        .iter()
        .filter_map(|arg| match arg.binding {
            Some(naga::Binding::Location { location, .. }) => Some(location),
            _ => None,
        })
        .collect();
    assert_eq!(locations, vec![0, 1, 2]);
}

fn find_function<'a>(module: &'a naga::Module, name: &str) -> (naga::Handle<naga::Function>, &'a naga::Function) {
    module
        .functions
        .iter()
        .find(|(_, f)| f.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("function {name} missing"))
}

#[test]
fn test_wrap_depth_folds_time_before_depth() {
    let module = parse_and_validate(STARFIELD_SHADER).unwrap();
    let (_, wrap) = find_function(&module, "wrap_depth");

    assert_eq!(wrap.arguments.len(), 3);
    assert!(wrap.result.is_some());

    // One floored modulo for t, one for z + t.
    let floors = wrap
        .expressions
        .iter()
        .filter(|(_, e)| matches!(e, naga::Expression::Math { fun: naga::MathFunction::Floor, .. }))
        .count();
    assert_eq!(floors, 2);

    // Band guards: folded time, negative remainder, and the final range check.
    let selects = wrap
        .expressions
        .iter()
        .filter(|(_, e)| matches!(e, naga::Expression::Select { .. }))
        .count();
    assert_eq!(selects, 3);
}

#[test]
fn test_vertex_stage_uses_wrap_depth() {
    let module = parse_and_validate(STARFIELD_SHADER).unwrap();
    let (wrap_handle, _) = find_function(&module, "wrap_depth");
    let vertex = module
        .entry_points
        .iter()
        .find(|ep| ep.name == VERTEX_ENTRY)
        .unwrap();

    let calls_wrap = vertex.function.body.iter().any(|stmt| {
        matches!(stmt, naga::Statement::Call { function, .. } if *function == wrap_handle)
    });
    assert!(calls_wrap);
}

#[test]
fn test_broken_shader_is_rejected() {
    let broken = STARFIELD_SHADER.replace("fn wrap_depth", "fn wrap_depth_renamed");
    assert!(parse_and_validate(&broken).is_err());
}
