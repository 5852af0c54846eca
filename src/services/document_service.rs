// src/services/document_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{
    common::error::AppError,
    models::{lot::Lot, property::Application},
};

const CSV_HEADER: [&str; 6] = ["Data", "Produto", "Dose", "Método", "Responsável", "Cultura"];

/// Relatório de aplicações em CSV: cabeçalho + uma linha por aplicação.
/// Campos com vírgula, aspas ou quebra de linha saem entre aspas (aspas dobradas).
pub fn applications_csv(applications: &[Application]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for app in applications {
        let date = app.date.format("%Y-%m-%d").to_string();
        writer.write_record([
            date.as_str(),
            app.product.as_str(),
            app.dose.as_str(),
            app.method.as_str(),
            app.responsible.as_str(),
            app.culture.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.into()))
}

/// `relatorio_aplicacoes_{nome}.csv`, com cada sequência de espaços trocada por `_`.
pub fn csv_file_name(property_name: &str) -> String {
    let mut name = String::with_capacity(property_name.len());
    let mut in_run = false;
    for c in property_name.chars() {
        if c.is_whitespace() {
            if !in_run {
                name.push('_');
            }
            in_run = true;
        } else {
            name.push(c);
            in_run = false;
        }
    }
    format!("relatorio_aplicacoes_{}.csv", name)
}

/// Valor de Content-Disposition com o nome entre aspas (aspas e barras escapadas,
/// caracteres de controle removidos).
pub fn attachment_disposition(file_name: &str) -> String {
    let escaped: String = file_name
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}

/// URL pública de rastreio do lote (conteúdo do QR code).
/// O código vai codificado como um único segmento de caminho.
pub fn lot_trace_url(public_base_url: &str, lot_code: &str) -> String {
    format!(
        "{}/api/public/lots/{}",
        public_base_url.trim_end_matches('/'),
        urlencoding::encode(lot_code)
    )
}

fn render_error(e: impl std::fmt::Display) -> AppError {
    AppError::DocumentRender(e.to_string())
}

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: PathBuf,
    public_base_url: String,
}

impl DocumentService {
    pub fn new(fonts_dir: impl Into<PathBuf>, public_base_url: String) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            public_base_url,
        }
    }

    pub fn trace_url(&self, lot_code: &str) -> String {
        lot_trace_url(&self.public_base_url, lot_code)
    }

    /// Ficha de rastreabilidade do lote em PDF, com QR code para a consulta pública.
    pub fn generate_lot_pdf(&self, lot: &Lot) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| AppError::FontNotFound(self.fonts_dir.display().to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Lote {}", lot.lot_code));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new("RASTREABILIDADE DE LOTE")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new(format!("Lote: {}", lot.lot_code))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("Insumo: {}", lot.input_name)));
        doc.push(elements::Paragraph::new(format!("Fabricante: {}", lot.manufacturer)));
        if !lot.composition.is_empty() {
            doc.push(elements::Paragraph::new(format!("Composição: {}", lot.composition)));
        }
        doc.push(elements::Paragraph::new(format!(
            "Fabricação: {}    Validade: {}",
            lot.manufacture_date.format("%d/%m/%Y"),
            lot.expiry_date.format("%d/%m/%Y")
        )));

        doc.push(elements::Break::new(2));

        // --- MOVIMENTAÇÕES ---
        // Pesos: Data (2), Evento (4), Local (3), Responsável (3)
        let mut table = elements::TableLayout::new(vec![2, 4, 3, 3]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Data").styled(style_bold))
            .element(elements::Paragraph::new("Evento").styled(style_bold))
            .element(elements::Paragraph::new("Local").styled(style_bold))
            .element(elements::Paragraph::new("Responsável").styled(style_bold))
            .push()
            .map_err(render_error)?;

        for movement in &lot.movements {
            table
                .row()
                .element(elements::Paragraph::new(movement.date.format("%d/%m/%Y").to_string()))
                .element(elements::Paragraph::new(movement.event.clone()))
                .element(elements::Paragraph::new(movement.location.clone()))
                .element(elements::Paragraph::new(movement.responsible_party.clone()))
                .push()
                .map_err(render_error)?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- QR CODE ---
        let url = self.trace_url(&lot.lot_code);
        doc.push(
            elements::Paragraph::new("CONSULTA PÚBLICA")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Paragraph::new(url.clone()).styled(style::Style::new().with_font_size(8)));
        doc.push(elements::Break::new(1));

        let code = QrCode::new(url.as_bytes()).map_err(render_error)?;
        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
            .map_err(render_error)?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);

        // Renderiza em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(render_error)?;

        tracing::debug!("📄 PDF do lote {} gerado ({} bytes)", lot.lot_code, buffer.len());
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{application, date, lot};

    #[test]
    fn csv_has_header_and_one_line_per_application() {
        let apps = vec![
            application("app-1", date(2024, 6, 10), "Herbicida Z-MAX"),
            application("app-2", date(2024, 6, 12), "Fungicida Protetor"),
        ];

        let csv = applications_csv(&apps).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Data,Produto,Dose,Método,Responsável,Cultura");
        assert_eq!(
            lines[1],
            "2024-06-10,Herbicida Z-MAX,2L/ha,Pulverização tratorizada,João da Silva (CREA-SP 123456),Soja"
        );
        assert!(csv.ends_with('\n'));
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn csv_quotes_commas_and_quotes() {
        let mut app = application("app-1", date(2024, 6, 10), "Herbicida \"Z\", 480");
        app.dose = "2,5L/ha".into();

        let csv = applications_csv(&[app]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("2024-06-10,\"Herbicida \"\"Z\"\", 480\",\"2,5L/ha\","));
    }

    #[test]
    fn empty_property_exports_only_header() {
        assert_eq!(
            applications_csv(&[]).unwrap(),
            "Data,Produto,Dose,Método,Responsável,Cultura\n"
        );
    }

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(
            csv_file_name("Fazenda  Santa Luzia"),
            "relatorio_aplicacoes_Fazenda_Santa_Luzia.csv"
        );
    }

    #[test]
    fn file_name_keeps_edge_whitespace_as_underscore() {
        assert_eq!(
            csv_file_name(" Sítio\tÁgua Limpa "),
            "relatorio_aplicacoes__Sítio_Água_Limpa_.csv"
        );
    }

    #[test]
    fn disposition_escapes_quotes() {
        assert_eq!(
            attachment_disposition("relatorio_aplicacoes_Fazenda_\"Boa\"_Vista.csv"),
            "attachment; filename=\"relatorio_aplicacoes_Fazenda_\\\"Boa\\\"_Vista.csv\""
        );
    }

    #[test]
    fn trace_url_encodes_reserved_characters() {
        assert_eq!(
            lot_trace_url("http://localhost:3000", "LOTE 01/A#2"),
            "http://localhost:3000/api/public/lots/LOTE%2001%2FA%232"
        );
    }

    #[test]
    fn trace_url_points_to_public_route() {
        assert_eq!(
            lot_trace_url("http://localhost:3000/", "LOTE-20240615-001"),
            "http://localhost:3000/api/public/lots/LOTE-20240615-001"
        );
    }

    #[test]
    fn missing_fonts_are_reported() {
        let service = DocumentService::new("/caminho/que/nao/existe", "http://localhost:3000".into());
        let err = service.generate_lot_pdf(&lot("LOTE-1")).unwrap_err();
        assert!(matches!(err, AppError::FontNotFound(_)));
    }
}
