// src/services/document_service.rs

use genpdf::{Element, elements, style};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;

use crate::common::error::AppError;

/// Renderiza a proposta comercial em PDF para envio ao cliente.
#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: String,
}

impl DocumentService {
    pub fn new(fonts_dir: String) -> Self {
        Self { fonts_dir }
    }

    /// Gera o PDF da proposta em memória: cabeçalho do estúdio, corpo em
    /// parágrafos, linha de investimento e, quando o projeto já existe,
    /// um QR code com o link do Portal do Cliente.
    pub fn generate_proposal_pdf(
        &self,
        client_name: &str,
        body: &str,
        budget: Option<Decimal>,
        portal_url: Option<&str>,
    ) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta de fonts.
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("Fonte não encontrada na pasta {}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Proposta - {client_name}"));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new("SPAZIO STUDIO")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new("Arquitetura & Gestão de Obras")
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new(format!("PROPOSTA COMERCIAL - {client_name}"))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Break::new(2));

        // --- CORPO ---
        for paragraph in body.split('\n').filter(|p| !p.trim().is_empty()) {
            doc.push(elements::Paragraph::new(paragraph.trim()));
            doc.push(elements::Break::new(1));
        }

        // --- INVESTIMENTO ---
        if let Some(budget) = budget {
            doc.push(elements::Break::new(1));
            let mut investment =
                elements::Paragraph::new(format!("INVESTIMENTO ESTIMADO: R$ {budget:.2}"));
            investment.set_alignment(genpdf::Alignment::Right);
            doc.push(investment.styled(style::Style::new().bold().with_font_size(12)));
        }

        // --- ACESSO AO PORTAL (QR CODE) ---
        if let Some(url) = portal_url {
            doc.push(elements::Break::new(2));
            doc.push(
                elements::Paragraph::new("ACOMPANHE SEU PROJETO")
                    .styled(style::Style::new().bold().with_font_size(12)),
            );
            doc.push(elements::Paragraph::new(format!("Portal: {url}")));
            doc.push(elements::Break::new(1));

            let code = QrCode::new(url.as_bytes())
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

            let image_buffer = code.render::<Luma<u8>>().build();
            let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

            let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
                .with_scale(genpdf::Scale::new(0.5, 0.5));

            doc.push(pdf_image);
        }

        // Renderiza para buffer em memória.
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
