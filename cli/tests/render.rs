//! # cardchat Render Integration Tests
//!
//! File: cli/tests/render.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Runs `cardchat render` on saved backend answers and checks the terminal,
//! HTML and JSON output for each envelope kind and card shape.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn render_stdin(body: &str) -> assert_cmd::assert::Assert {
    cardchat_cmd().arg("render").write_stdin(body.to_string()).assert()
}

#[test]
fn test_render_chat_text() {
    render_stdin(r#"{"type":"chat","response":"¡Hola! ¿En qué puedo ayudarte?"}"#)
        .success()
        .stdout(predicate::str::contains("¡Hola! ¿En qué puedo ayudarte?"));
}

#[test]
fn test_render_chat_without_response() {
    render_stdin(r#"{"type":"chat"}"#)
        .success()
        .stdout(predicate::str::contains("No response received"));
}

#[test]
fn test_render_error_envelope() {
    render_stdin(r#"{"type":"error","error":"Servicio no disponible"}"#)
        .success()
        .stdout(predicate::str::contains("❌ Error: Servicio no disponible"));
}

#[test]
fn test_render_unknown_type_and_garbage() {
    render_stdin(r#"{"type":"ping"}"#)
        .success()
        .stdout(predicate::str::contains("🤔 Unexpected response from server"));
    render_stdin("<html>502 Bad Gateway</html>")
        .success()
        .stdout(predicate::str::contains("🤔 Unexpected response from server"));
}

#[test]
fn test_render_empty_tool_calls() {
    render_stdin(r#"{"type":"tool_calls","results":[]}"#)
        .success()
        .stdout(predicate::str::contains("✅ Operation completed with no output"));
}

#[test]
fn test_render_subscriber_card_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abonado.json");
    fs::write(
        &path,
        r#"{"type":"tool_calls","results":[{"tool":"buscar_abonado","response":{"nombre":"Ana García","dni":"12345678Z","correo":"ana@example.com"}}]}"#,
    )
    .unwrap();

    cardchat_cmd()
        .arg("render")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("👤 buscar_abonado"))
        .stdout(predicate::str::contains("  👤 Ana García"))
        .stdout(predicate::str::contains("🆔 ID: 12345678Z"))
        .stdout(predicate::str::contains("📧 Email: ana@example.com"))
        .stdout(predicate::str::contains("📞").not());
}

#[test]
fn test_render_invoices_and_tool_error_in_order() {
    let body = r#"{"type":"tool_calls","results":[
        {"tool":"obtener_facturas","response":{"facturas":[{"identificador":"F-2024-01","estado":"Pendiente","importe":45.5}]}},
        {"tool":"crear_incidencia","error":"Sin permisos"}
    ]}"#;
    let output = cardchat_cmd()
        .arg("render")
        .write_stdin(body)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("📄 obtener_facturas"));
    assert!(stdout.contains("📄 Invoices (1)"));
    assert!(stdout.contains("# Invoice F-2024-01 | 📅 No date | Pendiente | €45.50"));
    let card_at = stdout.find("Invoices (1)").unwrap();
    let error_at = stdout.find("❌ Error in crear_incidencia: Sin permisos").unwrap();
    assert!(card_at < error_at);
}

#[test]
fn test_render_weather_card() {
    render_stdin(
        r#"{"type":"tool_calls","results":[{"tool":"consultar_clima","response":{"clima":"Clima: 20 grados en Madrid, soleado"}}]}"#,
    )
    .success()
    .stdout(predicate::str::contains("🌤️ consultar_clima"))
    .stdout(predicate::str::contains("🌤️ Weather in Madrid"))
    .stdout(predicate::str::contains("🌡️ 20°C"))
    .stdout(predicate::str::contains("☀️ Soleado"));
}

#[test]
fn test_render_generic_card() {
    render_stdin(
        r#"{"type":"tool_calls","results":[{"tool":"reiniciar_router","response":{"resultado":{"ok":true,"intentos":2}}}]}"#,
    )
    .success()
    .stdout(predicate::str::contains("🔧 reiniciar_router"))
    .stdout(predicate::str::contains("  resultado"))
    .stdout(predicate::str::contains("    intentos: 2"))
    .stdout(predicate::str::contains("    ok: true"));
}

#[test]
fn test_render_html_format() {
    cardchat_cmd()
        .args(["render", "--format", "html"])
        .write_stdin(
            r#"{"type":"tool_calls","results":[{"tool":"buscar_incidencia","response":{"incidencias":[{"ubicacion":"Calle Mayor 1","descripcion":"Sin fibra","estado":"Abierta"}]}}]}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Incidents (1)"))
        .stdout(predicate::str::contains("status-abierta"))
        .stdout(predicate::str::contains("Calle Mayor 1"));
}

#[test]
fn test_render_json_format() {
    let output = cardchat_cmd()
        .args(["render", "--format", "json"])
        .write_stdin(r#"{"type":"error"}"#)
        .output()
        .unwrap();
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items[0]["kind"], "text");
    assert_eq!(items[0]["tone"], "error");
}

#[test]
fn test_render_missing_file_fails() {
    cardchat_cmd()
        .args(["render", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read response file"));
}
