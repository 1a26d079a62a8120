//! Checklist templates
//!
//! Seed checklists for new properties and parties. Every new entity receives
//! a fresh copy of the matching template.

use crate::core::models::{ItemDraft, ItemTemplate, PartyKind};

/// Checklist for a rural property
pub const PROPERTY_CHECKLIST: &[ItemTemplate] = &[
    ItemTemplate {
        category: "Registro Imobiliário",
        name: "Certidão de Inteiro Teor da Matrícula",
        description: "Matrícula atualizada (até 30 dias) com todas as averbações e registros.",
    },
    ItemTemplate {
        category: "Registro Imobiliário",
        name: "Certidão de Ônus Reais",
        description: "Hipotecas, penhoras, alienações fiduciárias e demais gravames.",
    },
    ItemTemplate {
        category: "Registro Imobiliário",
        name: "Cadeia Dominial Vintenária",
        description: "Sucessão de proprietários nos últimos 20 anos, sem rupturas.",
    },
    ItemTemplate {
        category: "Cadastro e Fiscal",
        name: "CCIR",
        description: "Certificado de Cadastro de Imóvel Rural emitido pelo INCRA, quitado.",
    },
    ItemTemplate {
        category: "Cadastro e Fiscal",
        name: "ITR - Últimos 5 Exercícios",
        description: "Declarações e comprovantes de pagamento do ITR.",
    },
    ItemTemplate {
        category: "Cadastro e Fiscal",
        name: "CND do Imóvel Rural (Receita Federal)",
        description: "Certidão negativa de débitos relativos ao ITR.",
    },
    ItemTemplate {
        category: "Georreferenciamento",
        name: "Certificação SIGEF/INCRA",
        description: "Georreferenciamento certificado e averbado na matrícula.",
    },
    ItemTemplate {
        category: "Georreferenciamento",
        name: "Conferência de Área e Confrontantes",
        description: "Área do memorial descritivo confere com a matrícula e sem sobreposições.",
    },
    ItemTemplate {
        category: "Ambiental",
        name: "CAR - Cadastro Ambiental Rural",
        description: "Recibo do CAR ativo e sem pendências de análise.",
    },
    ItemTemplate {
        category: "Ambiental",
        name: "Reserva Legal e APP",
        description: "Percentual de reserva legal e áreas de preservação permanente regulares.",
    },
    ItemTemplate {
        category: "Ambiental",
        name: "Embargos IBAMA / Órgão Estadual",
        description: "Consulta de áreas embargadas e autos de infração ambiental.",
    },
    ItemTemplate {
        category: "Ambiental",
        name: "Outorga de Uso de Recursos Hídricos",
        description: "Outorgas de captação e barramentos, quando houver irrigação.",
    },
    ItemTemplate {
        category: "Posse e Uso",
        name: "Vistoria In Loco",
        description: "Verificação de posse mansa, ocupações, benfeitorias e divisas.",
    },
    ItemTemplate {
        category: "Posse e Uso",
        name: "Contratos de Arrendamento e Parceria",
        description: "Contratos agrários vigentes que vinculem o imóvel.",
    },
];

/// Checklist for a natural person (PF)
pub const PARTY_PF_CHECKLIST: &[ItemTemplate] = &[
    ItemTemplate {
        category: "Documentos Pessoais",
        name: "RG e CPF",
        description: "Documentos de identificação e situação cadastral do CPF.",
    },
    ItemTemplate {
        category: "Documentos Pessoais",
        name: "Certidão de Casamento / Estado Civil",
        description: "Regime de bens e necessidade de outorga conjugal.",
    },
    ItemTemplate {
        category: "Certidões Fiscais",
        name: "CND Federal (Receita/PGFN)",
        description: "Certidão conjunta de débitos federais e dívida ativa da União.",
    },
    ItemTemplate {
        category: "Certidões Fiscais",
        name: "CND Estadual e Municipal",
        description: "Certidões negativas de débitos no estado e município de domicílio.",
    },
    ItemTemplate {
        category: "Certidões Judiciais",
        name: "CNDT - Débitos Trabalhistas",
        description: "Certidão negativa de débitos trabalhistas (TST).",
    },
    ItemTemplate {
        category: "Certidões Judiciais",
        name: "Distribuidores Cíveis (Estadual e Federal)",
        description: "Ações cíveis, execuções fiscais e falências.",
    },
    ItemTemplate {
        category: "Certidões Judiciais",
        name: "Protestos de Títulos",
        description: "Certidão dos tabelionatos de protesto da comarca.",
    },
    ItemTemplate {
        category: "Certidões Judiciais",
        name: "Lista Suja do Trabalho Escravo",
        description: "Consulta ao cadastro de empregadores do Ministério do Trabalho.",
    },
];

/// Checklist for a legal entity (PJ)
pub const PARTY_PJ_CHECKLIST: &[ItemTemplate] = &[
    ItemTemplate {
        category: "Documentos Societários",
        name: "Contrato Social e Alterações",
        description: "Atos constitutivos consolidados registrados na Junta Comercial.",
    },
    ItemTemplate {
        category: "Documentos Societários",
        name: "Cartão CNPJ",
        description: "Situação cadastral ativa na Receita Federal.",
    },
    ItemTemplate {
        category: "Documentos Societários",
        name: "Poderes dos Administradores",
        description: "Representação e autorização para alienar imóveis.",
    },
    ItemTemplate {
        category: "Certidões Fiscais",
        name: "CND Federal (Receita/PGFN)",
        description: "Certidão conjunta de débitos federais e dívida ativa da União.",
    },
    ItemTemplate {
        category: "Certidões Fiscais",
        name: "CRF - FGTS",
        description: "Certificado de regularidade do FGTS (Caixa).",
    },
    ItemTemplate {
        category: "Certidões Fiscais",
        name: "CND Estadual e Municipal",
        description: "Certidões negativas de débitos na sede da empresa.",
    },
    ItemTemplate {
        category: "Certidões Judiciais",
        name: "CNDT - Débitos Trabalhistas",
        description: "Certidão negativa de débitos trabalhistas (TST).",
    },
    ItemTemplate {
        category: "Certidões Judiciais",
        name: "Falência e Recuperação Judicial",
        description: "Certidão do distribuidor de falências da sede.",
    },
    ItemTemplate {
        category: "Certidões Judiciais",
        name: "Protestos de Títulos",
        description: "Certidão dos tabelionatos de protesto da sede.",
    },
];

/// Fresh drafts for every entry of a template
#[must_use]
pub fn instantiate(template: &[ItemTemplate]) -> Vec<ItemDraft> {
    template.iter().map(ItemTemplate::draft).collect()
}

/// The checklist matching a party kind
#[must_use]
pub const fn party_checklist(kind: PartyKind) -> &'static [ItemTemplate] {
    match kind {
        PartyKind::Pf => PARTY_PF_CHECKLIST,
        PartyKind::Pj => PARTY_PJ_CHECKLIST,
    }
}
