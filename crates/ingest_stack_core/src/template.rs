//! Rendering of a resource graph into the deployable template document.
//!
//! The template is what crosses the boundary to the deployment engine:
//! resources keyed by logical id, outputs with literal values or deferred
//! attribute references, and a fingerprint for change detection.

use serde_json::{json, Map, Value};

use crate::graph::{OutputValue, ResourceGraph};
use crate::naming::graph_fingerprint;

pub const TEMPLATE_SCHEMA_VERSION: &str = "v1";

pub fn render_template(graph: &ResourceGraph) -> Value {
    let mut resources = Map::new();
    for resource in &graph.resources {
        let spec = serde_json::to_value(&resource.spec)
            .expect("serialization of a resource spec should not fail");
        resources.insert(resource.logical_id.clone(), spec);
    }

    let mut outputs = Map::new();
    for output in &graph.outputs {
        outputs.insert(
            output.key.clone(),
            json!({
                "value": render_output_value(&output.value),
                "description": &output.description,
            }),
        );
    }

    json!({
        "schema_version": TEMPLATE_SCHEMA_VERSION,
        "fingerprint": graph_fingerprint(graph),
        "resources": Value::Object(resources),
        "edges": &graph.edges,
        "outputs": Value::Object(outputs),
    })
}

fn render_output_value(value: &OutputValue) -> Value {
    match value {
        OutputValue::Literal(literal) => json!(literal),
        OutputValue::Attribute {
            resource,
            attribute,
        } => json!({ "Fn::GetAtt": [resource, attribute.as_str()] }),
    }
}
