//! API schema and browsable documentation (no authentication)
//!
//! `/openapi.json` serves an OpenAPI 3.1 document for the analytics routes;
//! `/swagger` and `/redoc` render it with the hosted Swagger UI and ReDoc
//! bundles.

use axum::{response::Html, routing::get, Json, Router};
use serde_json::{json, Map, Value};

use crate::AppState;

/// Scope parameter attached to an operation
#[derive(Clone, Copy)]
enum Scope {
    Unscoped,
    EmployeePath,
    OptionalDepartment,
    RequiredDepartment,
}

struct Operation {
    path: &'static str,
    tag: &'static str,
    summary: &'static str,
    scope: Scope,
    schema: &'static str,
    list: bool,
}

const OPERATIONS: &[Operation] = &[
    Operation {
        path: "/api/departments/analytics",
        tag: "departments",
        summary: "Headcount and average current salary per department",
        scope: Scope::Unscoped,
        schema: "DepartmentAnalytics",
        list: true,
    },
    Operation {
        path: "/api/employees/{id}/attendance_analytics",
        tag: "employees",
        summary: "Attendance counts and rate for one employee",
        scope: Scope::EmployeePath,
        schema: "AttendanceAnalytics",
        list: false,
    },
    Operation {
        path: "/api/employees/{id}/performance_trend",
        tag: "employees",
        summary: "Review average and goals met for one employee",
        scope: Scope::EmployeePath,
        schema: "PerformanceTrend",
        list: false,
    },
    Operation {
        path: "/api/employees/{id}/salary_growth",
        tag: "employees",
        summary: "Initial vs current salary for one employee",
        scope: Scope::EmployeePath,
        schema: "SalaryGrowth",
        list: false,
    },
    Operation {
        path: "/api/attendance/status_summary",
        tag: "attendance",
        summary: "Attendance rows grouped by status",
        scope: Scope::OptionalDepartment,
        schema: "StatusCount",
        list: true,
    },
    Operation {
        path: "/api/attendance/department_attendance",
        tag: "attendance",
        summary: "Attendance rows grouped by status for one department",
        scope: Scope::RequiredDepartment,
        schema: "StatusCount",
        list: true,
    },
    Operation {
        path: "/api/performance/rating_distribution",
        tag: "performance",
        summary: "Reviews grouped by rating",
        scope: Scope::OptionalDepartment,
        schema: "RatingCount",
        list: true,
    },
    Operation {
        path: "/api/performance/department_performance",
        tag: "performance",
        summary: "Review rollup for one department",
        scope: Scope::RequiredDepartment,
        schema: "DepartmentPerformance",
        list: true,
    },
    Operation {
        path: "/api/salaries/salary_stats",
        tag: "salaries",
        summary: "Statistics over current salaries",
        scope: Scope::Unscoped,
        schema: "SalaryStats",
        list: false,
    },
    Operation {
        path: "/api/salaries/department_salaries",
        tag: "salaries",
        summary: "Current salary rollup for one department",
        scope: Scope::RequiredDepartment,
        schema: "DepartmentSalaries",
        list: true,
    },
];

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema_ref("Error") } }
    })
}

fn department_parameter(required: bool) -> Value {
    json!({
        "name": "department",
        "in": "query",
        "required": required,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn operation(op: &Operation) -> Value {
    let body = if op.list {
        json!({ "type": "array", "items": schema_ref(op.schema) })
    } else {
        schema_ref(op.schema)
    };

    let mut responses = Map::new();
    responses.insert(
        "200".into(),
        json!({ "description": "OK", "content": { "application/json": { "schema": body } } }),
    );
    responses.insert("403".into(), error_response("Missing or invalid credentials"));
    responses.insert("429".into(), error_response("Request budget exhausted"));

    let parameters = match op.scope {
        Scope::Unscoped => vec![],
        Scope::EmployeePath => {
            responses.insert("400".into(), error_response("Invalid employee ID"));
            responses.insert("404".into(), error_response("Employee or salary data not found"));
            vec![json!({
                "name": "id",
                "in": "path",
                "required": true,
                "schema": { "type": "integer", "format": "int64" }
            })]
        }
        Scope::OptionalDepartment => {
            responses.insert("400".into(), error_response("Invalid department ID"));
            responses.insert("404".into(), error_response("Department not found"));
            vec![department_parameter(false)]
        }
        Scope::RequiredDepartment => {
            responses.insert(
                "400".into(),
                error_response("Department ID missing or invalid"),
            );
            responses.insert("404".into(), error_response("Department not found"));
            vec![department_parameter(true)]
        }
    };

    json!({
        "get": {
            "tags": [op.tag],
            "summary": op.summary,
            "parameters": parameters,
            "security": [{ "timestamp": [], "hash": [] }],
            "responses": responses
        }
    })
}

/// Object schema with every listed property required
fn object(properties: &[(&str, Value)]) -> Value {
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    let properties: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| (name.to_string(), schema.clone()))
        .collect();
    json!({ "type": "object", "properties": properties, "required": required })
}

fn components() -> Value {
    let integer = json!({ "type": "integer", "format": "int64" });
    let count = json!({ "type": "integer", "minimum": 0 });
    let number = json!({ "type": "number", "format": "double" });
    let string = json!({ "type": "string" });
    let money = json!({ "type": "string", "pattern": "^-?\\d+\\.\\d{2}$", "example": "50000.00" });
    let status = json!({
        "type": "string",
        "enum": ["present", "absent", "late", "half_day", "leave"]
    });

    json!({
        "schemas": {
            "Error": object(&[("error", string.clone())]),
            "DepartmentAnalytics": object(&[
                ("id", integer.clone()),
                ("name", string.clone()),
                ("location", string.clone()),
                ("employee_count", count.clone()),
                ("average_salary", money.clone()),
            ]),
            "AttendanceAnalytics": object(&[
                ("id", integer.clone()),
                ("first_name", string.clone()),
                ("last_name", string.clone()),
                ("present_count", count.clone()),
                ("absent_count", count.clone()),
                ("late_count", count.clone()),
                ("attendance_rate", number.clone()),
            ]),
            "PerformanceTrend": object(&[
                ("id", integer.clone()),
                ("first_name", string.clone()),
                ("last_name", string.clone()),
                ("average_rating", number.clone()),
                ("goals_met_count", count.clone()),
                ("total_reviews", count.clone()),
            ]),
            "SalaryGrowth": object(&[
                ("id", integer.clone()),
                ("first_name", string.clone()),
                ("last_name", string.clone()),
                ("initial_salary", money.clone()),
                ("current_salary", money.clone()),
                ("growth_percentage", number.clone()),
                ("total_bonus", money.clone()),
            ]),
            "StatusCount": object(&[("status", status), ("count", count.clone())]),
            "RatingCount": object(&[
                ("rating", json!({ "type": "integer", "minimum": 1, "maximum": 5 })),
                ("count", count.clone()),
            ]),
            "DepartmentPerformance": object(&[
                ("department_id", integer.clone()),
                ("department_name", string.clone()),
                ("average_rating", number.clone()),
                ("goals_met_percentage", number),
                ("review_count", count.clone()),
            ]),
            "SalaryStats": object(&[
                ("average_salary", money.clone()),
                ("min_salary", money.clone()),
                ("max_salary", money.clone()),
                ("total_bonus_paid", money.clone()),
            ]),
            "DepartmentSalaries": object(&[
                ("department_id", integer),
                ("department_name", string),
                ("average_salary", money.clone()),
                ("total_employees", count),
                ("total_bonus", money),
            ]),
        },
        "securitySchemes": {
            "timestamp": {
                "type": "apiKey",
                "in": "query",
                "name": "timestamp",
                "description": "Unix time in milliseconds"
            },
            "hash": {
                "type": "apiKey",
                "in": "query",
                "name": "hash",
                "description": "SHA-256 of the canonical request JSON plus the shared secret"
            }
        }
    })
}

/// OpenAPI document for the analytics routes and `/health`
pub fn openapi_document() -> Value {
    let mut paths: Map<String, Value> = OPERATIONS
        .iter()
        .map(|op| (op.path.to_string(), operation(op)))
        .collect();

    paths.insert(
        "/health".into(),
        json!({
            "get": {
                "tags": ["health"],
                "summary": "Service and database status",
                "security": [],
                "responses": { "200": { "description": "OK" } }
            }
        }),
    );

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "HR Analytics API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Attendance, performance and salary analytics over HR records"
        },
        "paths": paths,
        "components": components()
    })
}

async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(
        r##"<!DOCTYPE html><html lang="en"><head><meta charset="UTF-8"><title>HR Analytics API</title><link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist/swagger-ui.css" /></head><body style="margin: 0; padding: 0;"><div id="swagger-ui"></div><script src="https://unpkg.com/swagger-ui-dist/swagger-ui-bundle.js"></script><script>window.onload = () => { SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" }); };</script></body></html>"##,
    )
}

async fn redoc() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="UTF-8"><title>HR Analytics API</title><meta name="viewport" content="width=device-width, initial-scale=1"><style>body { margin: 0; padding: 0; }</style></head><body><div id="redoc-container"></div><script src="https://unpkg.com/redoc/bundles/redoc.standalone.js"></script><script>Redoc.init("/openapi.json", {}, document.getElementById("redoc-container"));</script></body></html>"#,
    )
}

pub fn docs_routes() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/swagger", get(swagger_ui))
        .route("/redoc", get(redoc))
}
