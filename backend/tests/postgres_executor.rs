//! Integration tests for `PostgresProcedureExecutor` against embedded
//! PostgreSQL.
//!
//! Each test installs a small set of procedures that follow the clinic's
//! calling convention (quoted mixed-case names, `INOUT "pResultado"`,
//! `INOUT "pMsg"` and an optional `"pCursor"` refcursor) and drives them
//! through `StoredProcedureGateway`, so statement rendering, cursor draining
//! and envelope assembly are checked together.
//!
//! Cluster bootstrap is blocking, so tests stay synchronous and drive the
//! gateway on a runtime owned by the fixture.

use std::sync::Arc;

use clinica_backend::domain::{
    ErrorCode, MessageLocale, ProcedureCall, Row, RowDecodeError, StoredProcedureGateway,
    read_all, read_first,
};
use clinica_backend::outbound::persistence::{ConnectionConfig, PostgresProcedureExecutor};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use tokio_postgres::NoTls;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{format_postgres_error, fresh_database, handle_cluster_setup_failure, shared_cluster};

const PROCEDURES: &str = r#"
CREATE TABLE "CatMedicos" (
    "Id" serial PRIMARY KEY,
    "Nombre" varchar(100) NOT NULL,
    "Especialidad" varchar(100)
);
INSERT INTO "CatMedicos" ("Nombre", "Especialidad")
VALUES ('Ana Ruiz', 'Cardiología'), ('Luis Mora', NULL);

CREATE PROCEDURE "procCatMedicosCon"(
    "pId" integer,
    INOUT "pResultado" boolean,
    INOUT "pMsg" varchar,
    INOUT "pCursor" refcursor
)
LANGUAGE plpgsql AS $body$
BEGIN
    OPEN "pCursor" FOR
        SELECT "Id", "Nombre", "Especialidad"
        FROM "CatMedicos"
        WHERE "pId" IS NULL OR "Id" = "pId"
        ORDER BY "Id";
    "pResultado" := true;
    "pMsg" := 'Consulta exitosa';
END
$body$;

CREATE PROCEDURE "procSinMensaje"(
    "pExito" boolean,
    INOUT "pResultado" boolean,
    INOUT "pMsg" varchar,
    INOUT "pCursor" refcursor
)
LANGUAGE plpgsql AS $body$
BEGIN
    "pResultado" := "pExito";
END
$body$;

CREATE PROCEDURE "procCatMedicosDel"(
    "pId" integer,
    INOUT "pResultado" boolean,
    INOUT "pMsg" varchar
)
LANGUAGE plpgsql AS $body$
BEGIN
    DELETE FROM "CatMedicos" WHERE "Id" = "pId";
    IF FOUND THEN
        "pResultado" := true;
        "pMsg" := 'Médico eliminado';
    ELSE
        "pResultado" := false;
        "pMsg" := 'Médico no encontrado';
    END IF;
END
$body$;

CREATE PROCEDURE "procLongitudClave"(
    "pClave" varchar,
    INOUT "pResultado" boolean,
    INOUT "pMsg" varchar
)
LANGUAGE plpgsql AS $body$
BEGIN
    "pResultado" := true;
    "pMsg" := 'longitud ' || length("pClave");
END
$body$;
"#;

type DoctorRow = (i32, String, Option<String>);

fn decode_doctor(row: &Row) -> Result<DoctorRow, RowDecodeError> {
    Ok((
        row.int("Id")?,
        row.string("Nombre")?,
        row.opt_string("Especialidad")?,
    ))
}

struct Harness {
    runtime: Runtime,
    gateway: StoredProcedureGateway,
}

async fn install_procedures(url: &str) -> Result<(), String> {
    let (client, connection) = tokio_postgres::connect(url, NoTls)
        .await
        .map_err(|err| format_postgres_error(&err))?;
    let driver = tokio::spawn(connection);
    client
        .batch_execute(PROCEDURES)
        .await
        .map_err(|err| format_postgres_error(&err))?;
    drop(client);
    let _ = driver.await;
    Ok(())
}

#[fixture]
fn harness() -> Option<Harness> {
    let cluster = match shared_cluster() {
        Ok(cluster) => cluster,
        Err(reason) => return handle_cluster_setup_failure(reason),
    };
    let url = match fresh_database(cluster) {
        Ok(url) => url,
        Err(reason) => return handle_cluster_setup_failure(reason),
    };
    let runtime = Runtime::new().expect("tokio runtime");
    if let Err(reason) = runtime.block_on(install_procedures(&url)) {
        panic!("failed to install test procedures: {reason}");
    }
    let executor =
        PostgresProcedureExecutor::new(&ConnectionConfig::new(url)).expect("valid database url");
    Some(Harness {
        runtime,
        gateway: StoredProcedureGateway::new(Arc::new(executor), MessageLocale::En),
    })
}

fn doctors(harness: &Harness, id: Option<i32>) -> Vec<DoctorRow> {
    let call = ProcedureCall::new("procCatMedicosCon").int("pId", id);
    let envelope = harness
        .runtime
        .block_on(
            harness
                .gateway
                .query(call, |rows| read_all(rows, decode_doctor).map(Some)),
        )
        .expect("doctor query succeeds");
    assert!(envelope.success());
    assert_eq!(envelope.message(), "Consulta exitosa");
    envelope.into_data().expect("query returns rows")
}

#[rstest]
fn cursor_rows_keep_order_and_null_columns(harness: Option<Harness>) {
    let Some(harness) = harness else { return };

    let rows = doctors(&harness, None);

    assert_eq!(
        rows,
        vec![
            (1, "Ana Ruiz".to_owned(), Some("Cardiología".to_owned())),
            (2, "Luis Mora".to_owned(), None),
        ]
    );
}

#[rstest]
#[case(true, "Operation succeeded.")]
#[case(false, "Operation returned no message.")]
fn blank_message_and_unopened_cursor(
    harness: Option<Harness>,
    #[case] outcome: bool,
    #[case] expected_message: &str,
) {
    let Some(harness) = harness else { return };
    let call = ProcedureCall::new("procSinMensaje").boolean("pExito", outcome);

    let envelope = harness
        .runtime
        .block_on(harness.gateway.query(call, |rows| {
            assert_eq!(rows.remaining(), 0, "no cursor means no rows");
            read_first(rows, decode_doctor)
        }))
        .expect("procedure call completes");

    assert_eq!(envelope.success(), outcome);
    assert_eq!(envelope.message(), expected_message);
    assert_eq!(envelope.into_data(), None);
}

#[rstest]
fn delete_runs_without_cursor_and_reports_flag(harness: Option<Harness>) {
    let Some(harness) = harness else { return };
    let delete = || ProcedureCall::new("procCatMedicosDel").int("pId", 2);

    let first = harness
        .runtime
        .block_on(harness.gateway.execute(delete()))
        .expect("delete completes");
    assert!(first.success());
    assert_eq!(first.message(), "Médico eliminado");
    assert_eq!(first.data(), None);
    assert!(doctors(&harness, Some(2)).is_empty());

    let second = harness
        .runtime
        .block_on(harness.gateway.execute(delete()))
        .expect("repeat delete completes");
    assert!(!second.success());
    assert_eq!(second.message(), "Médico no encontrado");
}

#[rstest]
fn secret_parameters_bind_as_varchar(harness: Option<Harness>) {
    let Some(harness) = harness else { return };
    let call = ProcedureCall::new("procLongitudClave").secret_varchar("pClave", "s3creta!", 50);

    let envelope = harness
        .runtime
        .block_on(harness.gateway.execute(call))
        .expect("procedure call completes");

    assert!(envelope.success());
    assert_eq!(envelope.message(), "longitud 8");
}

#[rstest]
fn missing_procedure_is_an_internal_error(harness: Option<Harness>) {
    let Some(harness) = harness else { return };
    let call = ProcedureCall::new("procNoExiste").int("pId", 1);

    let err = harness
        .runtime
        .block_on(harness.gateway.execute(call))
        .expect_err("unknown procedure fails");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
